//! Scene objects written by the mapping layer and read by the renderer.

use crate::state::Camera;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::time::Duration;

/// Mesh topology. Sizes live on the object so meshes can be shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Unit icosphere with `detail` rounds of midpoint subdivision.
    Icosahedron { detail: u32 },
    Octahedron,
    Cube,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Wireframe,
    Solid,
    /// Solid surface displaced by the shader from time and amplitude.
    Shader,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: [f32; 3],
    pub emissive: f32,
    pub opacity: f32,
}

impl Style {
    pub fn hex(color: u32, emissive: f32) -> Self {
        Self {
            color: rgb_hex(color),
            emissive,
            opacity: 1.0,
        }
    }
}

/// `0xRRGGBB` to linear-ish float RGB.
pub fn rgb_hex(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    ]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub category: Category,
    pub style: Style,
    /// Base radius / half-extent folded into the model matrix.
    pub size: f32,
    pub transform: Transform,
    /// Anchor the mapping layer offsets from (ring slots, spawn points).
    pub home: Vec3,
    /// Per-frame drift, used by the librarian nodes.
    pub velocity: Vec3,
}

impl SceneObject {
    pub fn new(shape: Shape, category: Category, style: Style, size: f32, position: Vec3) -> Self {
        Self {
            shape,
            category,
            style,
            size,
            transform: Transform::at(position),
            home: position,
            velocity: Vec3::ZERO,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform.matrix() * Mat4::from_scale(Vec3::splat(self.size))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleCloud {
    pub points: Vec<Vec3>,
    pub color: [f32; 4],
    /// World-space sprite half-size.
    pub point_size: f32,
    pub transform: Transform,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PostParams {
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
}

impl Default for PostParams {
    fn default() -> Self {
        Self {
            bloom_strength: 0.0,
            bloom_radius: 0.0,
            bloom_threshold: 1.0,
        }
    }
}

/// Inputs of shader-category materials.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShaderParams {
    pub time: f32,
    /// Normalised amplitude in `[0, 1]`.
    pub level: f32,
}

/// Transient line between two points that fades out linearly.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    pub from: Vec3,
    pub to: Vec3,
    pub color: [f32; 3],
    pub age: Duration,
    pub lifetime: Duration,
}

impl Connector {
    pub fn new(from: Vec3, to: Vec3, color: [f32; 3], lifetime: Duration) -> Self {
        Self {
            from,
            to,
            color,
            age: Duration::ZERO,
            lifetime,
        }
    }

    /// 1 when spawned, 0 at the end of its lifetime.
    pub fn opacity(&self) -> f32 {
        if self.lifetime.is_zero() {
            return 0.0;
        }
        (1.0 - self.age.as_secs_f32() / self.lifetime.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<SceneObject>,
    pub particles: Option<ParticleCloud>,
    /// At most two lights are uploaded to the GPU.
    pub lights: Vec<Light>,
    pub post: PostParams,
    pub shader: ShaderParams,
    pub connectors: Vec<Connector>,
    pub clear_color: [f32; 4],
}

impl Scene {
    pub fn new(camera: Camera, clear_color: [f32; 4]) -> Self {
        Self {
            camera,
            objects: Vec::new(),
            particles: None,
            lights: Vec::new(),
            post: PostParams::default(),
            shader: ShaderParams::default(),
            connectors: Vec::new(),
            clear_color,
        }
    }

    /// Advance connector fades by `dt` and drop the finished ones.
    pub fn age_connectors(&mut self, dt: Duration) {
        for c in &mut self.connectors {
            c.age += dt;
        }
        self.connectors.retain(|c| !c.expired());
    }
}
