//! Closed-form signal -> visual mappings.
//!
//! Every function here is stateless: the same inputs always give the same
//! output, and nothing is smoothed or clamped beyond what the byte range of
//! the signal already guarantees.

use crate::constants::BYTE_MAX;
use glam::Vec2;

/// Normalised amplitude in `[0, 1]`.
#[inline]
pub fn level(amplitude: f32) -> f32 {
    amplitude / BYTE_MAX
}

/// Per-frame rotation increment for object `index`.
#[inline]
pub fn rotation_step(base: f32, frequency: f32, factor: f32, index: usize) -> f32 {
    base + frequency * factor * (index as f32 + 1.0)
}

/// Uniform scale that grows linearly with amplitude: `1` at silence,
/// `1 + coefficient` at full scale.
#[inline]
pub fn pulse_scale(amplitude: f32, coefficient: f32) -> f32 {
    1.0 + level(amplitude) * coefficient
}

/// Oscillating offset for object `index`: `(sin, cos)` of the shared phase,
/// scaled by the normalised amplitude and the spatial range.
#[inline]
pub fn orbit_offset(time: f32, speed: f32, index: usize, amplitude: f32, range: f32) -> Vec2 {
    let phase = time * speed + index as f32;
    let reach = level(amplitude) * range;
    Vec2::new(phase.sin() * reach, phase.cos() * reach)
}

/// `base + span * level`, used for light and post-processing parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub base: f32,
    pub span: f32,
}

impl Affine {
    pub const fn new(base: f32, span: f32) -> Self {
        Self { base, span }
    }

    pub const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    #[inline]
    pub fn at(&self, level: f32) -> f32 {
        self.base + self.span * level
    }

    /// Value at full-scale signal.
    pub fn max(&self) -> f32 {
        self.at(1.0)
    }
}

/// Bloom parameters as affine functions of the normalised amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomMapping {
    pub strength: Affine,
    pub radius: Affine,
    pub threshold: Affine,
}

impl BloomMapping {
    pub fn apply(&self, level: f32) -> crate::scene::PostParams {
        crate::scene::PostParams {
            bloom_strength: self.strength.at(level),
            bloom_radius: self.radius.at(level),
            bloom_threshold: self.threshold.at(level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_step_grows_with_index() {
        let a = rotation_step(0.01, 100.0, 0.001, 0);
        let b = rotation_step(0.01, 100.0, 0.001, 3);
        assert!((a - 0.11).abs() < 1e-6);
        assert!((b - 0.41).abs() < 1e-6);
    }

    #[test]
    fn orbit_offset_vanishes_at_silence() {
        let o = orbit_offset(12.3, 0.5, 4, 0.0, 2.0);
        assert_eq!(o, Vec2::ZERO);
    }

    #[test]
    fn affine_threshold_can_fall() {
        let t = Affine::new(0.8, -0.6);
        assert!((t.at(0.0) - 0.8).abs() < 1e-6);
        assert!((t.max() - 0.2).abs() < 1e-6);
    }
}
