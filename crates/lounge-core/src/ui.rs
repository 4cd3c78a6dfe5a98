//! Text readouts emitted by a frame pass. Front-ends decide where they go
//! (DOM elements on the web, the window title natively).

use crate::config::Variant;
use crate::constants::CLOCK_INTERVAL_SEC;
use crate::insight::InsightRecord;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiField {
    Amplitude,
    Frequency,
    SystemState,
    Clock,
    NodeA,
    NodeB,
    NodeResult,
    CurrentInsight,
}

impl UiField {
    /// Fields each variant writes. Front-ends require these at start-up.
    pub fn for_variant(variant: Variant) -> &'static [UiField] {
        match variant {
            Variant::Librarian => &[
                UiField::SystemState,
                UiField::Clock,
                UiField::NodeA,
                UiField::NodeB,
                UiField::NodeResult,
                UiField::CurrentInsight,
            ],
            Variant::Pulse | Variant::Spectrum => &[
                UiField::Amplitude,
                UiField::Frequency,
                UiField::SystemState,
                UiField::Clock,
            ],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiUpdate {
    Text { field: UiField, text: String },
    /// Once per second; the front-end renders its own clock.
    ClockTick,
}

impl UiUpdate {
    pub fn text(field: UiField, text: impl Into<String>) -> Self {
        UiUpdate::Text {
            field,
            text: text.into(),
        }
    }
}

pub fn format_amplitude(amplitude: f32) -> String {
    format!("{amplitude:.1}")
}

pub fn format_frequency(frequency: f32) -> String {
    format!("{frequency:.0}")
}

/// `HH:MM:SS`, wrapping at 24 hours.
pub fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs() % 86_400;
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// The three labelled fields plus the headline for a synthesis.
pub fn synthesis_updates(record: &InsightRecord, out: &mut Vec<UiUpdate>) {
    out.push(UiUpdate::text(UiField::NodeA, record.concept_a));
    out.push(UiUpdate::text(UiField::NodeB, record.concept_b));
    out.push(UiUpdate::text(UiField::NodeResult, record.result));
    out.push(UiUpdate::text(
        UiField::CurrentInsight,
        format!("SYNTHESIZING: {}", record.result),
    ));
}

/// Emits a [`UiUpdate::ClockTick`] on the first frame and then once per
/// interval.
#[derive(Clone, Debug)]
pub struct ReadoutClock {
    interval: Duration,
    elapsed: Option<Duration>,
}

impl Default for ReadoutClock {
    fn default() -> Self {
        Self::new(Duration::from_secs_f32(CLOCK_INTERVAL_SEC))
    }
}

impl ReadoutClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: None,
        }
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.elapsed.as_mut() {
            None => {
                self.elapsed = Some(Duration::ZERO);
                true
            }
            Some(e) => {
                *e += dt;
                if *e >= self.interval {
                    *e = Duration::ZERO;
                    true
                } else {
                    false
                }
            }
        }
    }
}
