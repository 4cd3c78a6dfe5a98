//! The three demos. Each builds its scene once and then maps the signal
//! snapshot onto it every frame.

pub mod librarian;
pub mod pulse;
pub mod spectrum;

pub use librarian::Librarian;
pub use pulse::Pulse;
pub use spectrum::Spectrum;

use crate::config::{AppConfig, Variant};
use crate::scene::Scene;
use crate::signal::SignalSnapshot;
use crate::ui::UiUpdate;
use glam::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::TAU;
use std::time::Duration;

/// Everything one mapping pass may read or write.
pub struct FrameCtx<'a> {
    pub scene: &'a mut Scene,
    pub snapshot: &'a SignalSnapshot,
    /// Time counter after this frame's increment.
    pub time: f32,
    /// Real time since the previous frame.
    pub dt: Duration,
    pub rng: &'a mut dyn RngCore,
    pub ui: &'a mut Vec<UiUpdate>,
}

pub trait Visualizer {
    fn variant(&self) -> Variant;

    /// Create the static scene. Called once.
    fn build(&mut self, rng: &mut dyn RngCore) -> Scene;

    /// How far the time counter advances for a frame that took `dt`.
    fn time_step(&self, dt: Duration) -> f32;

    fn update(&mut self, ctx: &mut FrameCtx<'_>);

    /// Free-text query. Only the librarian reacts to it.
    fn submit_query(
        &mut self,
        _text: &str,
        _scene: &mut Scene,
        _rng: &mut dyn RngCore,
        _ui: &mut Vec<UiUpdate>,
    ) {
    }
}

pub fn for_config(config: &AppConfig) -> Box<dyn Visualizer> {
    match config.variant {
        Variant::Librarian => Box::new(Librarian::default()),
        Variant::Pulse => Box::new(Pulse::default()),
        Variant::Spectrum => Box::new(Spectrum::default()),
    }
}

/// Points spread uniformly over directions with radius in `radius`, then
/// squashed on y by `flatten`.
pub(crate) fn scatter_shell<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    radius: (f32, f32),
    flatten: f32,
) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let z: f32 = rng.gen_range(-1.0..1.0);
            let phi = rng.gen_range(0.0..TAU);
            let r = rng.gen_range(radius.0..radius.1);
            let ring = (1.0 - z * z).sqrt();
            Vec3::new(ring * phi.cos(), z * flatten, ring * phi.sin()) * r
        })
        .collect()
}

/// Slot `index` of `count` evenly spaced points on a horizontal ring.
pub(crate) fn ring_slot(index: usize, count: usize, radius: f32) -> Vec3 {
    let theta = index as f32 / count as f32 * TAU;
    Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
}

/// Fully saturated colour for `hue` in turns.
pub(crate) fn hue_rgb(hue: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0) * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shell_points_stay_inside_radius_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for p in scatter_shell(&mut rng, 500, (9.0, 14.0), 1.0) {
            let d = p.length();
            assert!((9.0 - 1e-3..14.0 + 1e-3).contains(&d), "{d}");
        }
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(hue_rgb(0.0), [1.0, 0.0, 0.0]);
        assert_eq!(hue_rgb(1.0), hue_rgb(0.0));
        assert_eq!(hue_rgb(1.0 / 3.0)[1], 1.0);
    }
}
