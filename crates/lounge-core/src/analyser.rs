//! Software frequency analyser for front-ends without a platform one.
//!
//! Mirrors a WebAudio `AnalyserNode`: Blackman window, magnitude smoothing
//! over time, decibels mapped onto `0..=255` between a floor and a ceiling.

use crate::constants::{ANALYSER_MAX_DB, ANALYSER_MIN_DB, ANALYSER_SMOOTHING, BYTE_MAX};
use crate::signal::FrequencyAnalyser;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::{Arc, Mutex};

/// Rolling mono PCM buffer written by an audio callback.
#[derive(Debug, Clone)]
pub struct PcmTap {
    samples: VecDeque<f32>,
    capacity: usize,
}

pub type SharedTap = Arc<Mutex<PcmTap>>;

impl PcmTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn shared(capacity: usize) -> SharedTap {
        Arc::new(Mutex::new(Self::new(capacity)))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Downmix interleaved frames to mono and keep the newest `capacity`.
    pub fn push_interleaved(&mut self, data: &[f32], channels: usize) {
        let channels = channels.max(1);
        for frame in data.chunks(channels) {
            let mono = frame.iter().sum::<f32>() / frame.len() as f32;
            self.samples.push_back(mono);
        }
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Copy the newest `out.len()` samples, zero-padding at the front when
    /// fewer are buffered.
    pub fn copy_latest(&self, out: &mut [f32]) {
        let have = self.samples.len().min(out.len());
        let pad = out.len() - have;
        out[..pad].fill(0.0);
        let start = self.samples.len() - have;
        for (dst, src) in out[pad..].iter_mut().zip(self.samples.range(start..)) {
            *dst = *src;
        }
    }
}

pub struct SpectrumAnalyser {
    tap: SharedTap,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    frame: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl SpectrumAnalyser {
    pub fn new(tap: SharedTap, fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self {
            tap,
            fft,
            window: (0..fft_size).map(|i| blackman_window(i, fft_size)).collect(),
            frame: vec![0.0; fft_size],
            buffer: vec![Complex::new(0.0, 0.0); fft_size],
            smoothed: vec![0.0; fft_size / 2],
            smoothing: ANALYSER_SMOOTHING,
            min_db: ANALYSER_MIN_DB,
            max_db: ANALYSER_MAX_DB,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.window.len()
    }

    pub fn bin_count(&self) -> usize {
        self.smoothed.len()
    }

    /// Analyse one window of PCM (`fft_size` samples) into byte magnitudes.
    pub fn analyse(&mut self, pcm: &[f32], out: &mut [u8]) {
        let n = self.fft_size();
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let s = pcm.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let scale = BYTE_MAX / (self.max_db - self.min_db);
        for (k, byte) in out.iter_mut().enumerate() {
            let Some(prev) = self.smoothed.get_mut(k) else {
                *byte = 0;
                continue;
            };
            let magnitude = self.buffer[k].norm() / n as f32;
            *prev = self.smoothing * *prev + (1.0 - self.smoothing) * magnitude;
            let db = if *prev > 0.0 {
                20.0 * prev.log10()
            } else {
                f32::NEG_INFINITY
            };
            *byte = ((db - self.min_db) * scale).clamp(0.0, BYTE_MAX) as u8;
        }
    }
}

impl FrequencyAnalyser for SpectrumAnalyser {
    fn read_bytes(&mut self, out: &mut [u8]) {
        {
            let tap = self.tap.lock().unwrap_or_else(|p| p.into_inner());
            tap.copy_latest(&mut self.frame);
        }
        let frame = std::mem::take(&mut self.frame);
        self.analyse(&frame, out);
        self.frame = frame;
    }
}

/// Blackman window coefficient (alpha = 0.16), as used by WebAudio.
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let a0 = 0.42;
    let a1 = 0.5;
    let a2 = 0.08;
    let x = index as f32 / size as f32;
    a0 - a1 * (2.0 * PI * x).cos() + a2 * (4.0 * PI * x).cos()
}
