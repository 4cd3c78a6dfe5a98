//! Camera state shared with the renderer.
//!
//! The type avoids platform APIs so the native and web front-ends build the
//! same matrices from it.

use glam::{Mat4, Vec3};

/// Right-handed camera with a perspective projection. The aspect ratio is
/// supplied by the renderer, which knows the surface size.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 12.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy_radians: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl Camera {
    pub fn looking_at_origin(eye: Vec3, fov_deg: f32) -> Self {
        Self {
            eye,
            fovy_radians: fov_deg.to_radians(),
            ..Self::default()
        }
    }

    /// Clip-space projection for the given surface aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
