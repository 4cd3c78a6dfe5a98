use super::{ring_slot, scatter_shell, FrameCtx, Visualizer};
use crate::config::Variant;
use crate::constants::*;
use crate::mapping::{orbit_offset, pulse_scale, rotation_step, Affine, BloomMapping};
use crate::scene::{
    rgb_hex, Category, Light, ParticleCloud, Scene, SceneObject, Shape, Style, Transform,
};
use crate::state::Camera;
use glam::Vec3;
use rand::RngCore;
use std::time::Duration;

pub const CORE: usize = 0;
pub const SHELL: usize = 1;
pub const FIRST_SATELLITE: usize = 2;

/// Pulsing core, wireframe shell and a ring of orbiting satellites.
#[derive(Clone, Copy, Debug)]
pub struct Pulse {
    pub light: Affine,
    pub bloom: BloomMapping,
}

impl Default for Pulse {
    fn default() -> Self {
        Self {
            light: Affine::new(PULSE_LIGHT_BASE, PULSE_LIGHT_SPAN),
            bloom: BloomMapping {
                strength: Affine::from_pair(PULSE_BLOOM_STRENGTH),
                radius: Affine::from_pair(PULSE_BLOOM_RADIUS),
                threshold: Affine::from_pair(PULSE_BLOOM_THRESHOLD),
            },
        }
    }
}

/// Scale coefficient of object `index`.
pub fn scale_coefficient(index: usize) -> f32 {
    match index {
        CORE => PULSE_CORE_SCALE_COEF,
        SHELL => PULSE_SHELL_SCALE_COEF,
        _ => PULSE_SATELLITE_SCALE_COEF,
    }
}

impl Visualizer for Pulse {
    fn variant(&self) -> Variant {
        Variant::Pulse
    }

    fn build(&mut self, rng: &mut dyn RngCore) -> Scene {
        let camera = Camera::looking_at_origin(Vec3::new(0.0, 0.0, PULSE_CAMERA_Z), PULSE_FOV_DEG);
        let mut scene = Scene::new(camera, CLEAR_COLOR);

        scene.objects.push(SceneObject::new(
            Shape::Icosahedron {
                detail: PULSE_CORE_DETAIL,
            },
            Category::Solid,
            Style::hex(PULSE_CORE_COLOR, PULSE_EMISSIVE),
            PULSE_CORE_SIZE,
            Vec3::ZERO,
        ));
        scene.objects.push(SceneObject::new(
            Shape::Icosahedron {
                detail: PULSE_SHELL_DETAIL,
            },
            Category::Wireframe,
            Style::hex(PULSE_SHELL_COLOR, 1.0),
            PULSE_SHELL_SIZE,
            Vec3::ZERO,
        ));
        for i in 0..PULSE_SATELLITE_COUNT {
            scene.objects.push(SceneObject::new(
                Shape::Octahedron,
                Category::Wireframe,
                Style::hex(PULSE_SATELLITE_COLOR, 1.0),
                PULSE_SATELLITE_SIZE,
                ring_slot(i, PULSE_SATELLITE_COUNT, PULSE_RING_RADIUS),
            ));
        }

        scene.particles = Some(ParticleCloud {
            points: scatter_shell(rng, PULSE_PARTICLE_COUNT, PULSE_PARTICLE_RADIUS, 1.0),
            color: PULSE_PARTICLE_COLOR,
            point_size: PULSE_PARTICLE_SIZE,
            transform: Transform::default(),
        });
        scene.lights.push(Light {
            position: Vec3::from(PULSE_LIGHT_POSITION),
            color: rgb_hex(PULSE_LIGHT_COLOR),
            intensity: self.light.base,
        });
        scene.post = self.bloom.apply(0.0);
        scene
    }

    fn time_step(&self, _dt: Duration) -> f32 {
        PULSE_TIME_STEP
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        let amplitude = ctx.snapshot.amplitude();
        let frequency = ctx.snapshot.frequency();
        let level = ctx.snapshot.level();
        let scene = &mut *ctx.scene;

        for (i, obj) in scene.objects.iter_mut().enumerate() {
            let t = &mut obj.transform;
            t.rotation.x += rotation_step(PULSE_ROT_BASE[0], frequency, PULSE_ROT_FREQ_FACTOR, i);
            t.rotation.y += rotation_step(PULSE_ROT_BASE[1], frequency, PULSE_ROT_FREQ_FACTOR, i);
            t.scale = Vec3::splat(pulse_scale(amplitude, scale_coefficient(i)));

            if i >= FIRST_SATELLITE {
                let offset = orbit_offset(
                    ctx.time,
                    PULSE_ORBIT_SPEED,
                    i - FIRST_SATELLITE,
                    amplitude,
                    PULSE_ORBIT_RANGE,
                );
                let outward = obj.home.normalize_or_zero();
                t.position = obj.home + Vec3::Y * offset.x + outward * offset.y;
            }
        }

        if let Some(cloud) = scene.particles.as_mut() {
            cloud.transform.rotation.y += PULSE_PARTICLE_SPIN + frequency * PULSE_PARTICLE_SPIN_FREQ;
            cloud.transform.scale = Vec3::splat(pulse_scale(amplitude, PULSE_PARTICLE_SCALE_COEF));
        }
        if let Some(light) = scene.lights.first_mut() {
            light.intensity = self.light.at(level);
        }
        scene.post = self.bloom.apply(level);
        scene.shader.time = ctx.time;
        scene.shader.level = level;
    }
}
