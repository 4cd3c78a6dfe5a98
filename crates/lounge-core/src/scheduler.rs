//! Frame scheduling capability.
//!
//! A scheduler invokes the frame pass once per display refresh, one pass at
//! a time, in refresh order. Refreshes the platform skips are simply lost;
//! nothing here catches up.

use instant::Instant;
use std::time::Duration;

pub trait Scheduler {
    /// Start invoking `pass` once per refresh. Platform schedulers return
    /// immediately and keep running until the page or process goes away.
    fn run(self, pass: Box<dyn FnMut()>);
}

/// Runs a fixed number of passes synchronously. Used headless and in tests.
#[derive(Clone, Copy, Debug)]
pub struct StepScheduler {
    pub frames: usize,
}

impl Scheduler for StepScheduler {
    fn run(self, mut pass: Box<dyn FnMut()>) {
        for _ in 0..self.frames {
            pass();
        }
    }
}

/// Turns platform timestamps into per-frame deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Elapsed time since the previous tick; zero on the first one.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(prev) if now > prev => now - prev,
            _ => Duration::ZERO,
        };
        self.last = Some(now);
        dt
    }
}
