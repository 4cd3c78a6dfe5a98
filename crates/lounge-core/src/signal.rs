//! Per-frame signal snapshot and the sources that fill it.

use crate::constants::{
    BYTE_MAX, SYNTH_AMPLITUDE, SYNTH_INDEX_RATE, SYNTH_OFFSET, SYNTH_TIME_RATE,
};

/// Fixed-length buffer of byte magnitudes, overwritten once per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalSnapshot {
    bins: Vec<u8>,
}

impl SignalSnapshot {
    pub fn zeroed(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn bins_mut(&mut self) -> &mut [u8] {
        &mut self.bins
    }

    /// Byte at `index`, or zero past the end.
    pub fn bin(&self, index: usize) -> u8 {
        self.bins.get(index).copied().unwrap_or(0)
    }

    /// Arithmetic mean of the snapshot, in `[0, 255]`.
    pub fn amplitude(&self) -> f32 {
        amplitude(&self.bins)
    }

    /// Amplitude doubled. A display convention, not a spectral measurement.
    pub fn frequency(&self) -> f32 {
        self.amplitude() * 2.0
    }

    /// Amplitude scaled into `[0, 1]`.
    pub fn level(&self) -> f32 {
        self.amplitude() / BYTE_MAX
    }
}

#[inline]
pub fn amplitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32
}

/// A platform capability that exposes the most recent frequency-magnitude
/// window of whatever media is attached to it. Reads never block.
pub trait FrequencyAnalyser {
    fn read_bytes(&mut self, out: &mut [u8]);
}

/// Deterministic stand-in waveform used by demo mode.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticWave {
    pub time_rate: f32,
    pub index_rate: f32,
    pub amplitude: f32,
    pub offset: f32,
}

impl Default for SyntheticWave {
    fn default() -> Self {
        Self {
            time_rate: SYNTH_TIME_RATE,
            index_rate: SYNTH_INDEX_RATE,
            amplitude: SYNTH_AMPLITUDE,
            offset: SYNTH_OFFSET,
        }
    }
}

impl SyntheticWave {
    #[inline]
    pub fn value(&self, time: f32, index: usize) -> u8 {
        let v = (time * self.time_rate + index as f32 * self.index_rate).sin() * self.amplitude
            + self.offset;
        // float -> int casts saturate, so out-of-range constants still land in 0..=255
        v as u8
    }

    pub fn fill(&self, time: f32, out: &mut [u8]) {
        for (i, b) in out.iter_mut().enumerate() {
            *b = self.value(time, i);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignalMode {
    /// Nothing attached; the snapshot keeps whatever it last held.
    #[default]
    Idle,
    Live,
    Synthetic,
}

impl SignalMode {
    pub fn label(self) -> &'static str {
        match self {
            SignalMode::Idle => "IDLE",
            SignalMode::Live => "LIVE",
            SignalMode::Synthetic => "DEMO",
        }
    }
}

/// Selects where the snapshot comes from each frame.
#[derive(Default)]
pub struct SignalSource {
    mode: SignalMode,
    live: Option<Box<dyn FrequencyAnalyser>>,
    wave: SyntheticWave,
}

impl SignalSource {
    pub fn new(wave: SyntheticWave) -> Self {
        Self {
            mode: SignalMode::Idle,
            live: None,
            wave,
        }
    }

    pub fn mode(&self) -> SignalMode {
        self.mode
    }

    /// Switch to live analysis. Returns the previous mode.
    pub fn attach_live(&mut self, analyser: Box<dyn FrequencyAnalyser>) -> SignalMode {
        self.live = Some(analyser);
        std::mem::replace(&mut self.mode, SignalMode::Live)
    }

    /// Switch to the synthetic waveform, dropping any live analyser.
    pub fn enter_synthetic(&mut self) -> SignalMode {
        self.live = None;
        std::mem::replace(&mut self.mode, SignalMode::Synthetic)
    }

    pub fn go_idle(&mut self) -> SignalMode {
        self.live = None;
        std::mem::replace(&mut self.mode, SignalMode::Idle)
    }

    pub fn poll(&mut self, time: f32, snapshot: &mut SignalSnapshot) {
        match self.mode {
            SignalMode::Idle => {}
            SignalMode::Synthetic => self.wave.fill(time, snapshot.bins_mut()),
            SignalMode::Live => {
                if let Some(analyser) = self.live.as_mut() {
                    analyser.read_bytes(snapshot.bins_mut());
                }
            }
        }
    }
}
