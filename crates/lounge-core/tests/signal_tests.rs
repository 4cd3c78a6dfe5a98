// Signal snapshot, synthetic waveform and source switching.

use lounge_core::constants::SIGNAL_BINS;
use lounge_core::signal::amplitude;
use lounge_core::{FrequencyAnalyser, SignalMode, SignalSnapshot, SignalSource, SyntheticWave};

struct Constant(u8);

impl FrequencyAnalyser for Constant {
    fn read_bytes(&mut self, out: &mut [u8]) {
        out.fill(self.0);
    }
}

#[test]
fn amplitude_is_the_mean_and_frequency_doubles_it() {
    assert_eq!(amplitude(&[0, 10, 20, 30]), 15.0);
    assert_eq!(amplitude(&[]), 0.0);

    let mut snap = SignalSnapshot::zeroed(SIGNAL_BINS);
    snap.bins_mut().fill(255);
    assert_eq!(snap.amplitude(), 255.0);
    assert_eq!(snap.frequency(), 510.0);
    assert_eq!(snap.level(), 1.0);
}

#[test]
fn synthetic_wave_stays_inside_its_band() {
    let wave = SyntheticWave::default();
    let mut out = [0u8; SIGNAL_BINS];
    for step in 0..500 {
        wave.fill(step as f32 * 0.013, &mut out);
        for &b in &out {
            assert!((27..=228).contains(&b), "byte {b} outside band");
        }
    }
}

#[test]
fn synthetic_wave_follows_the_sine_formula() {
    let wave = SyntheticWave::default();
    let t = 0.37;
    let expected = ((t * 10.0 + 5.0 * 0.15_f32).sin() * 100.0 + 128.0) as u8;
    assert_eq!(wave.value(t, 5), expected);
}

#[test]
fn idle_poll_leaves_buffer_untouched() {
    let mut source = SignalSource::default();
    let mut snap = SignalSnapshot::zeroed(32);
    source.poll(1.0, &mut snap);
    assert!(snap.bins().iter().all(|&b| b == 0));

    snap.bins_mut()[3] = 99;
    source.poll(2.0, &mut snap);
    assert_eq!(snap.bin(3), 99);
}

#[test]
fn live_mode_reads_the_analyser() {
    let mut source = SignalSource::default();
    let prev = source.attach_live(Box::new(Constant(255)));
    assert_eq!(prev, SignalMode::Idle);
    assert_eq!(source.mode(), SignalMode::Live);

    let mut snap = SignalSnapshot::zeroed(SIGNAL_BINS);
    source.poll(0.0, &mut snap);
    assert_eq!(snap.amplitude(), 255.0);

    // back to idle keeps the last window
    source.go_idle();
    source.poll(0.5, &mut snap);
    assert_eq!(snap.amplitude(), 255.0);
}

#[test]
fn synthetic_mode_replaces_live() {
    let mut source = SignalSource::default();
    source.attach_live(Box::new(Constant(0)));
    assert_eq!(source.enter_synthetic(), SignalMode::Live);

    let mut snap = SignalSnapshot::zeroed(64);
    source.poll(0.0, &mut snap);
    assert_eq!(snap.bin(0), 128);
    assert!(snap.amplitude() > 0.0);
}

#[test]
fn bin_past_the_end_reads_zero() {
    let snap = SignalSnapshot::zeroed(4);
    assert_eq!(snap.bin(100), 0);
}
