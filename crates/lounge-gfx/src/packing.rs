//! Scene to GPU data: uniform blocks, per-instance records and draw batches.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use lounge_core::{Category, Connector, Scene, SceneObject, Shape};
use std::ops::Range;

pub const MAX_LIGHTS: usize = 2;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Globals {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub particle_model: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// xyz position, w intensity.
    pub light_pos: [[f32; 4]; MAX_LIGHTS],
    pub light_color: [[f32; 4]; MAX_LIGHTS],
    /// time, level, particle half-size, unused.
    pub params: [f32; 4],
    pub particle_color: [f32; 4],
}

impl Globals {
    pub fn from_scene(scene: &Scene, aspect: f32) -> Self {
        let mut light_pos = [[0.0; 4]; MAX_LIGHTS];
        let mut light_color = [[0.0; 4]; MAX_LIGHTS];
        for (i, light) in scene.lights.iter().take(MAX_LIGHTS).enumerate() {
            light_pos[i] = light.position.extend(light.intensity).to_array();
            let [r, g, b] = light.color;
            light_color[i] = [r, g, b, 1.0];
        }
        let (particle_model, particle_size, particle_color) = match &scene.particles {
            Some(cloud) => (cloud.transform.matrix(), cloud.point_size, cloud.color),
            None => (Mat4::IDENTITY, 0.0, [0.0; 4]),
        };
        Self {
            view: scene.camera.view_matrix().to_cols_array_2d(),
            proj: scene.camera.projection_matrix(aspect).to_cols_array_2d(),
            particle_model: particle_model.to_cols_array_2d(),
            camera_pos: scene.camera.eye.extend(1.0).to_array(),
            light_pos,
            light_color,
            params: [scene.shader.time, scene.shader.level, particle_size, 0.0],
            particle_color,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// emissive, shader displacement flag, unused, unused.
    pub material: [f32; 4],
}

impl Instance {
    pub fn from_object(obj: &SceneObject) -> Self {
        let [r, g, b] = obj.style.color;
        let shader_flag = if obj.category == Category::Shader {
            1.0
        } else {
            0.0
        };
        Self {
            model: obj.model_matrix().to_cols_array_2d(),
            color: [r, g, b, obj.style.opacity],
            material: [obj.style.emissive, shader_flag, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Which pipeline draws a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshPass {
    /// Filled triangles, lit (solid and shader categories).
    Lit,
    /// Edge lines.
    Wire,
}

impl From<Category> for MeshPass {
    fn from(category: Category) -> Self {
        match category {
            Category::Wireframe => MeshPass::Wire,
            Category::Solid | Category::Shader => MeshPass::Lit,
        }
    }
}

/// A run of instances sharing one mesh and one pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawBatch {
    pub pass: MeshPass,
    pub shape: Shape,
    pub instances: Range<u32>,
}

/// Group `objects` into batches. Instances are written contiguously per
/// batch, lit batches first.
pub fn build_batches(
    objects: &[SceneObject],
    instances: &mut Vec<Instance>,
    batches: &mut Vec<DrawBatch>,
) {
    instances.clear();
    batches.clear();
    let mut groups: Vec<((MeshPass, Shape), Vec<Instance>)> = Vec::new();
    for obj in objects {
        let key = (MeshPass::from(obj.category), obj.shape);
        let inst = Instance::from_object(obj);
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => list.push(inst),
            None => groups.push((key, vec![inst])),
        }
    }
    groups.sort_by_key(|((pass, _), _)| *pass == MeshPass::Wire);
    for ((pass, shape), list) in groups {
        let start = instances.len() as u32;
        instances.extend(list);
        batches.push(DrawBatch {
            pass,
            shape,
            instances: start..instances.len() as u32,
        });
    }
}

/// Two vertices per connector, alpha following its fade.
pub fn connector_vertices(connectors: &[Connector], out: &mut Vec<LineVertex>) {
    out.clear();
    for c in connectors {
        let [r, g, b] = c.color;
        let color = [r, g, b, c.opacity()];
        out.push(LineVertex {
            position: c.from.to_array(),
            color,
        });
        out.push(LineVertex {
            position: c.to.to_array(),
            color,
        });
    }
}

/// `[0, 1]` clear colour to the wgpu type.
pub fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}
