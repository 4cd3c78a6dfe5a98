//! Insight catalog and the timers that decide when a synthesis fires.

use crate::constants::{SYNTHESIS_INTERVAL_MS, SYNTHESIS_QUERY_DELAY_MS};
use rand::Rng;
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsightRecord {
    pub concept_a: &'static str,
    pub concept_b: &'static str,
    pub result: &'static str,
}

pub const INSIGHT_CATALOG: [InsightRecord; 5] = [
    InsightRecord {
        concept_a: "MARINE BIOLOGY",
        concept_b: "ARCHITECTURE",
        result: "HYDRO-RESILIENT URBANISM",
    },
    InsightRecord {
        concept_a: "MYCOLOGY",
        concept_b: "DATA ROUTING",
        result: "MYCELIAL NETWORK TOPOLOGY",
    },
    InsightRecord {
        concept_a: "STOICISM",
        concept_b: "AI ALIGNMENT",
        result: "VIRTUE-BASED LOGIC GATES",
    },
    InsightRecord {
        concept_a: "QUANTUM PHYSICS",
        concept_b: "FINANCE",
        result: "STOCHASTIC WEALTH SUPERPOSITION",
    },
    InsightRecord {
        concept_a: "LINGUISTICS",
        concept_b: "GENETICS",
        result: "SEMANTIC DNA SEQUENCING",
    },
];

/// Outcome of one synthesis: the record to display and the two scene
/// objects to connect. The pair is drawn with replacement, so both indices
/// may be equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Synthesis {
    pub record: InsightRecord,
    pub pair: (usize, usize),
}

pub fn synthesize<R: Rng + ?Sized>(
    catalog: &[InsightRecord],
    node_count: usize,
    rng: &mut R,
) -> Option<Synthesis> {
    if catalog.is_empty() || node_count == 0 {
        return None;
    }
    let record = catalog[rng.gen_range(0..catalog.len())];
    let a = rng.gen_range(0..node_count);
    let b = rng.gen_range(0..node_count);
    Some(Synthesis {
        record,
        pair: (a, b),
    })
}

/// Decides when syntheses fire: once on the first frame, then every
/// `interval` of real time, plus once per submitted query after `query_delay`.
/// Query firings do not reset the automatic timer.
#[derive(Clone, Debug)]
pub struct SynthesisTimer {
    interval: Duration,
    query_delay: Duration,
    since_auto: Option<Duration>,
    pending: SmallVec<[Duration; 4]>,
}

impl Default for SynthesisTimer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(SYNTHESIS_INTERVAL_MS),
            Duration::from_millis(SYNTHESIS_QUERY_DELAY_MS),
        )
    }
}

impl SynthesisTimer {
    pub fn new(interval: Duration, query_delay: Duration) -> Self {
        Self {
            interval,
            query_delay,
            since_auto: None,
            pending: SmallVec::new(),
        }
    }

    /// Schedule one firing `query_delay` from now.
    pub fn submit(&mut self) {
        self.pending.push(self.query_delay);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Advance by `dt` and return how many firings are due.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let mut due = 0;
        self.pending.retain(|remaining| {
            if *remaining <= dt {
                due += 1;
                false
            } else {
                *remaining -= dt;
                true
            }
        });
        match self.since_auto.as_mut() {
            None => {
                self.since_auto = Some(Duration::ZERO);
                due += 1;
            }
            Some(elapsed) => {
                *elapsed += dt;
                if *elapsed > self.interval {
                    *elapsed = Duration::ZERO;
                    due += 1;
                }
            }
        }
        due
    }
}
