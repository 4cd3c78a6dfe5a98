use super::{hue_rgb, ring_slot, scatter_shell, FrameCtx, Visualizer};
use crate::config::Variant;
use crate::constants::*;
use crate::mapping::{level, pulse_scale, rotation_step, Affine, BloomMapping};
use crate::scene::{
    rgb_hex, Category, Light, ParticleCloud, Scene, SceneObject, Shape, Style, Transform,
};
use crate::state::Camera;
use glam::Vec3;
use rand::RngCore;
use std::time::Duration;

pub const SPHERE: usize = 0;
pub const FIRST_BAR: usize = 1;

/// Spectrum ring around a displaced sphere, seen from an orbiting camera.
/// Runs on real elapsed time.
#[derive(Clone, Copy, Debug)]
pub struct Spectrum {
    pub key_light: Affine,
    pub rim_light: Affine,
    pub bloom: BloomMapping,
}

impl Default for Spectrum {
    fn default() -> Self {
        Self {
            key_light: Affine::from_pair(SPECTRUM_KEY_LIGHT),
            rim_light: Affine::from_pair(SPECTRUM_RIM_LIGHT),
            bloom: BloomMapping {
                strength: Affine::from_pair(SPECTRUM_BLOOM_STRENGTH),
                radius: Affine::from_pair(SPECTRUM_BLOOM_RADIUS),
                threshold: Affine::from_pair(SPECTRUM_BLOOM_THRESHOLD),
            },
        }
    }
}

/// Snapshot bin read by bar `bar` when the snapshot holds `bins` values.
pub fn bar_bin(bar: usize, bins: usize) -> usize {
    bar * bins / SPECTRUM_BAR_COUNT
}

/// Vertical scale of a bar reading `byte`.
pub fn bar_height(byte: u8) -> f32 {
    pulse_scale(byte as f32, SPECTRUM_BAR_COEF)
}

pub fn camera_eye(time: f32, level: f32) -> Vec3 {
    let phase = time * SPECTRUM_ORBIT_SPEED;
    Vec3::new(
        phase.sin() * SPECTRUM_ORBIT_RADIUS,
        SPECTRUM_CAMERA_HEIGHT
            + (time * SPECTRUM_CAMERA_BOB_SPEED).sin() * level * SPECTRUM_CAMERA_BOB_RANGE,
        phase.cos() * SPECTRUM_ORBIT_RADIUS,
    )
}

fn bar_color(bar: usize) -> [f32; 3] {
    let (from, to) = (
        rgb_hex(SPECTRUM_BAR_COLORS.0),
        rgb_hex(SPECTRUM_BAR_COLORS.1),
    );
    let t = bar as f32 / (SPECTRUM_BAR_COUNT - 1) as f32;
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}

impl Visualizer for Spectrum {
    fn variant(&self) -> Variant {
        Variant::Spectrum
    }

    fn build(&mut self, rng: &mut dyn RngCore) -> Scene {
        let camera = Camera::looking_at_origin(camera_eye(0.0, 0.0), SPECTRUM_FOV_DEG);
        let mut scene = Scene::new(camera, CLEAR_COLOR);

        scene.objects.push(SceneObject::new(
            Shape::Icosahedron {
                detail: SPECTRUM_SPHERE_DETAIL,
            },
            Category::Shader,
            Style::hex(SPECTRUM_SPHERE_COLOR, SPECTRUM_EMISSIVE),
            SPECTRUM_SPHERE_SIZE,
            Vec3::ZERO,
        ));
        for bar in 0..SPECTRUM_BAR_COUNT {
            let mut obj = SceneObject::new(
                Shape::Cube,
                Category::Solid,
                Style {
                    color: bar_color(bar),
                    emissive: SPECTRUM_EMISSIVE,
                    opacity: 1.0,
                },
                SPECTRUM_BAR_SIZE,
                ring_slot(bar, SPECTRUM_BAR_COUNT, SPECTRUM_RING_RADIUS),
            );
            // face the centre
            obj.transform.rotation.y = -(obj.home.z.atan2(obj.home.x));
            scene.objects.push(obj);
        }

        scene.particles = Some(ParticleCloud {
            points: scatter_shell(
                rng,
                SPECTRUM_PARTICLE_COUNT,
                SPECTRUM_PARTICLE_RADIUS,
                SPECTRUM_PARTICLE_FLATTEN,
            ),
            color: SPECTRUM_PARTICLE_COLOR,
            point_size: SPECTRUM_PARTICLE_SIZE,
            transform: Transform::default(),
        });
        scene.lights.push(Light {
            position: Vec3::from(SPECTRUM_KEY_LIGHT_POSITION),
            color: [1.0, 1.0, 1.0],
            intensity: self.key_light.base,
        });
        scene.lights.push(Light {
            position: Vec3::from(SPECTRUM_RIM_LIGHT_POSITION),
            color: hue_rgb(0.0),
            intensity: self.rim_light.base,
        });
        scene.post = self.bloom.apply(0.0);
        scene
    }

    fn time_step(&self, dt: Duration) -> f32 {
        dt.as_secs_f32()
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        let amplitude = ctx.snapshot.amplitude();
        let frequency = ctx.snapshot.frequency();
        let a = level(amplitude);
        let bins = ctx.snapshot.len();
        let scene = &mut *ctx.scene;

        if let Some(sphere) = scene.objects.get_mut(SPHERE) {
            let t = &mut sphere.transform;
            t.rotation.x += rotation_step(SPECTRUM_ROT_BASE[0], frequency, SPECTRUM_ROT_FREQ_FACTOR, 0);
            t.rotation.y += rotation_step(SPECTRUM_ROT_BASE[1], frequency, SPECTRUM_ROT_FREQ_FACTOR, 0);
            t.scale = Vec3::splat(pulse_scale(amplitude, SPECTRUM_SPHERE_SCALE_COEF));
        }
        for (bar, obj) in scene.objects.iter_mut().skip(FIRST_BAR).enumerate() {
            let height = bar_height(ctx.snapshot.bin(bar_bin(bar, bins)));
            obj.transform.scale = Vec3::new(1.0, height, 1.0);
            // keep the base of the bar on the ring plane
            obj.transform.position.y = obj.home.y + obj.size * (height - 1.0);
        }

        if let Some(cloud) = scene.particles.as_mut() {
            cloud.transform.rotation.y +=
                SPECTRUM_PARTICLE_SPIN + frequency * SPECTRUM_PARTICLE_SPIN_FREQ;
            cloud.transform.scale =
                Vec3::splat(pulse_scale(amplitude, SPECTRUM_PARTICLE_SCALE_COEF));
        }
        if let [key, rim, ..] = scene.lights.as_mut_slice() {
            key.intensity = self.key_light.at(a);
            rim.intensity = self.rim_light.at(a);
            rim.color = hue_rgb(ctx.time * SPECTRUM_RIM_HUE_SPEED);
        }
        scene.camera.eye = camera_eye(ctx.time, a);
        scene.post = self.bloom.apply(a);
        scene.shader.time = ctx.time;
        scene.shader.level = a;
    }
}
