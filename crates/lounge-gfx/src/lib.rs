//! wgpu renderer for lounge scenes, shared by the web and native front-ends.
//!
//! One scene pass draws lit meshes, wireframes, particle sprites and
//! connector lines into an HDR target; a bloom chain then composites it onto
//! the surface.

mod gpu;
mod helpers;
pub mod mesh;
pub mod packing;
mod pipelines;
mod post;
mod targets;

pub use gpu::GpuState;
pub use post::PostUniforms;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
