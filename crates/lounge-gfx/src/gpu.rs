use crate::helpers::DynamicBuffer;
use crate::mesh::MeshData;
use crate::packing::{self, DrawBatch, Globals, Instance, LineVertex, MeshPass};
use crate::pipelines::ScenePipelines;
use crate::post::PostResources;
use crate::targets::RenderTargets;
use fnv::FnvHashMap;
use lounge_core::{ParticleCloud, Scene, Shape};
use wgpu::util::DeviceExt;

/// Triangle and edge buffers of one shape.
struct GpuMesh {
    triangles: wgpu::Buffer,
    triangle_vertices: u32,
    edges: wgpu::Buffer,
    edge_vertices: u32,
}

impl GpuMesh {
    fn new(device: &wgpu::Device, shape: Shape) -> Self {
        let data = MeshData::for_shape(shape);
        let tris = data.flat_vertices();
        let edges = data.edge_vertices();
        log::debug!(
            "[gpu] mesh {:?}: {} triangles, {} edges",
            shape,
            tris.len() / 3,
            edges.len() / 2
        );
        Self {
            triangles: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_triangles"),
                contents: bytemuck::cast_slice(&tris),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            triangle_vertices: tris.len() as u32,
            edges: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_edges"),
                contents: bytemuck::cast_slice(&edges),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            edge_vertices: edges.len() as u32,
        }
    }
}

/// Static particle positions. Uploaded once per cloud.
struct GpuParticles {
    buffer: wgpu::Buffer,
    count: u32,
}

impl GpuParticles {
    fn new(device: &wgpu::Device, cloud: &ParticleCloud) -> Self {
        let points: Vec<[f32; 4]> = cloud
            .points
            .iter()
            .map(|p| p.extend(1.0).to_array())
            .collect();
        Self {
            buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("particles"),
                contents: bytemuck::cast_slice(&points),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            count: points.len() as u32,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    post: PostResources,
    scene: ScenePipelines,
    meshes: FnvHashMap<Shape, GpuMesh>,
    particles: Option<GpuParticles>,
    instance_buf: DynamicBuffer,
    line_buf: DynamicBuffer,
    // per-frame scratch
    instances: Vec<Instance>,
    batches: Vec<DrawBatch>,
    lines: Vec<LineVertex>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    /// Create the device and all resources for a surface of `width` x `height`
    /// physical pixels. On the web pass `SurfaceTarget::Canvas`, natively a
    /// window handle.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // default limits so older WebGPU implementations accept the request
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!("request_device error: {e:?}"))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // a transparent clear shows the page behind the canvas
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {width}x{height} {format:?} alpha {alpha_mode:?}");

        let targets = RenderTargets::new(&device, width, height);
        let post = PostResources::new(&device, format, &targets);
        let scene = ScenePipelines::new(&device);
        let instance_buf = DynamicBuffer::new(&device, "instances");
        let line_buf = DynamicBuffer::new(&device, "connector_lines");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            post,
            scene,
            meshes: FnvHashMap::default(),
            particles: None,
            instance_buf,
            line_buf,
            instances: Vec::new(),
            batches: Vec::new(),
            lines: Vec::new(),
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post.rebind(&self.device, &self.targets);
        }
    }

    /// Reconfigure after `SurfaceError::Lost` / `Outdated`.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn upload(&mut self, scene: &Scene) {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let globals = Globals::from_scene(scene, aspect);
        self.queue
            .write_buffer(&self.scene.globals, 0, bytemuck::bytes_of(&globals));

        packing::build_batches(&scene.objects, &mut self.instances, &mut self.batches);
        for batch in &self.batches {
            self.meshes
                .entry(batch.shape)
                .or_insert_with(|| GpuMesh::new(&self.device, batch.shape));
        }
        self.instance_buf
            .write(&self.device, &self.queue, bytemuck::cast_slice(&self.instances));

        packing::connector_vertices(&scene.connectors, &mut self.lines);
        self.line_buf
            .write(&self.device, &self.queue, bytemuck::cast_slice(&self.lines));

        let cached = self.particles.as_ref().map(|p| p.count);
        match &scene.particles {
            Some(cloud) if cached != Some(cloud.points.len() as u32) => {
                self.particles = Some(GpuParticles::new(&self.device, cloud));
            }
            Some(_) => {}
            None => self.particles = None,
        }

        let bloom_res = RenderTargets::bloom_size(self.width, self.height);
        self.post.write_uniforms(&self.queue, bloom_res, &scene.post);
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.upload(scene);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(packing::clear_color(scene.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.scene.bind_group, &[]);

            if !self.instances.is_empty() {
                rpass.set_vertex_buffer(1, self.instance_buf.buffer.slice(..));
            }
            for batch in &self.batches {
                let Some(mesh) = self.meshes.get(&batch.shape) else {
                    continue;
                };
                match batch.pass {
                    MeshPass::Lit => {
                        rpass.set_pipeline(&self.scene.lit);
                        rpass.set_vertex_buffer(0, mesh.triangles.slice(..));
                        rpass.draw(0..mesh.triangle_vertices, batch.instances.clone());
                    }
                    MeshPass::Wire => {
                        rpass.set_pipeline(&self.scene.wire);
                        rpass.set_vertex_buffer(0, mesh.edges.slice(..));
                        rpass.draw(0..mesh.edge_vertices, batch.instances.clone());
                    }
                }
            }

            if let Some(particles) = self.particles.as_ref().filter(|p| p.count > 0) {
                rpass.set_pipeline(&self.scene.sprite);
                rpass.set_vertex_buffer(0, particles.buffer.slice(..));
                rpass.draw(0..6, 0..particles.count);
            }

            if !self.lines.is_empty() {
                rpass.set_pipeline(&self.scene.line);
                rpass.set_vertex_buffer(0, self.line_buf.buffer.slice(..));
                rpass.draw(0..self.lines.len() as u32, 0..1);
            }
        }

        self.post.encode(&mut encoder, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
