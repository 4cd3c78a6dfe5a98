// Shared visual/audio tuning constants used by both web and native frontends.
//
// The mapping constants are part of each variant's behaviour: changing them
// changes what the visualizer looks like for a given signal.

// Signal snapshot
pub const SIGNAL_BINS: usize = 128; // analyser fftSize 256 -> 128 frequency bins
pub const MIN_SIGNAL_BINS: usize = 16;
pub const MAX_SIGNAL_BINS: usize = 1024;
pub const BYTE_MAX: f32 = 255.0;

// Synthetic (demo) waveform: value(i) = sin(t*k1 + i*k2) * amp + offset
pub const SYNTH_TIME_RATE: f32 = 10.0;
pub const SYNTH_INDEX_RATE: f32 = 0.15;
pub const SYNTH_AMPLITUDE: f32 = 100.0;
pub const SYNTH_OFFSET: f32 = 128.0;

// Platform-analyser emulation (matches WebAudio AnalyserNode defaults)
pub const ANALYSER_SMOOTHING: f32 = 0.8;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Readouts
pub const CLOCK_INTERVAL_SEC: f32 = 1.0;

// ---------------- Librarian (variant 1) ----------------
pub const LIBRARIAN_TIME_STEP: f32 = 0.005;
pub const LIBRARIAN_NODE_COUNT: usize = 20;
pub const LIBRARIAN_SPAWN_EXTENT: [f32; 3] = [20.0, 20.0, 10.0]; // centred box
pub const LIBRARIAN_DRIFT_RANGE: f32 = 0.01; // velocity per axis in [-r/2, r/2)
pub const LIBRARIAN_SPIN_STEP: f32 = 0.01;
pub const LIBRARIAN_BOUND_X: f32 = 15.0;
pub const LIBRARIAN_BOUND_Y: f32 = 10.0;
pub const LIBRARIAN_NODE_SIZE: f32 = 0.3;
pub const LIBRARIAN_NODE_DETAIL: u32 = 1;
pub const LIBRARIAN_NODE_COLOR: u32 = 0x00ffcc;
pub const LIBRARIAN_QUERY_COLOR: u32 = 0xff3366;
pub const LIBRARIAN_QUERY_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const LIBRARIAN_EMISSIVE: f32 = 0.5;
pub const LIBRARIAN_CAMERA_Z: f32 = 12.0;
pub const LIBRARIAN_FOV_DEG: f32 = 75.0;

pub const SYNTHESIS_INTERVAL_MS: u64 = 8000;
pub const SYNTHESIS_QUERY_DELAY_MS: u64 = 1500;
pub const CONNECTOR_FADE_MS: u64 = 4000;

// ---------------- Pulse (variant 2) ----------------
pub const PULSE_TIME_STEP: f32 = 0.01;
pub const PULSE_CORE_DETAIL: u32 = 2;
pub const PULSE_SHELL_DETAIL: u32 = 1;
pub const PULSE_CORE_COLOR: u32 = 0xff2e88;
pub const PULSE_SHELL_COLOR: u32 = 0x00e5ff;
pub const PULSE_SATELLITE_COLOR: u32 = 0xffd166;
pub const PULSE_PARTICLE_COLOR: [f32; 4] = [0.55, 0.8, 1.0, 0.8];
pub const PULSE_PARTICLE_SIZE: f32 = 0.05;
pub const PULSE_LIGHT_COLOR: u32 = 0xffffff;
pub const PULSE_EMISSIVE: f32 = 0.35;
pub const PULSE_CORE_SIZE: f32 = 1.5;
pub const PULSE_CORE_SCALE_COEF: f32 = 0.8;
pub const PULSE_SHELL_SIZE: f32 = 2.4;
pub const PULSE_SHELL_SCALE_COEF: f32 = 0.5;
pub const PULSE_SATELLITE_COUNT: usize = 8;
pub const PULSE_SATELLITE_SIZE: f32 = 0.45;
pub const PULSE_SATELLITE_SCALE_COEF: f32 = 1.2;
pub const PULSE_RING_RADIUS: f32 = 4.5;
pub const PULSE_ORBIT_SPEED: f32 = 0.5;
pub const PULSE_ORBIT_RANGE: f32 = 2.0;
pub const PULSE_ROT_BASE: [f32; 2] = [0.003, 0.005];
pub const PULSE_ROT_FREQ_FACTOR: f32 = 0.00004;
pub const PULSE_PARTICLE_COUNT: usize = 1500;
pub const PULSE_PARTICLE_RADIUS: (f32, f32) = (9.0, 14.0);
pub const PULSE_PARTICLE_SPIN: f32 = 0.0005;
pub const PULSE_PARTICLE_SPIN_FREQ: f32 = 0.000005;
pub const PULSE_PARTICLE_SCALE_COEF: f32 = 0.25;
pub const PULSE_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 6.0];
pub const PULSE_LIGHT_BASE: f32 = 1.0;
pub const PULSE_LIGHT_SPAN: f32 = 4.0;
pub const PULSE_BLOOM_STRENGTH: (f32, f32) = (0.6, 1.8); // (base, span)
pub const PULSE_BLOOM_RADIUS: (f32, f32) = (0.3, 0.5);
pub const PULSE_BLOOM_THRESHOLD: (f32, f32) = (0.8, -0.6);
pub const PULSE_CAMERA_Z: f32 = 14.0;
pub const PULSE_FOV_DEG: f32 = 60.0;

// ---------------- Spectrum (variant 3) ----------------
pub const SPECTRUM_BAR_COUNT: usize = 32;
pub const SPECTRUM_BAR_COLORS: (u32, u32) = (0x00ffcc, 0xff3366); // first bar, last bar
pub const SPECTRUM_SPHERE_COLOR: u32 = 0x6a5cff;
pub const SPECTRUM_PARTICLE_COLOR: [f32; 4] = [0.8, 0.9, 1.0, 0.7];
pub const SPECTRUM_PARTICLE_SIZE: f32 = 0.06;
pub const SPECTRUM_PARTICLE_FLATTEN: f32 = 0.35; // y squash of the cloud
pub const SPECTRUM_KEY_LIGHT_POSITION: [f32; 3] = [5.0, 8.0, 10.0];
pub const SPECTRUM_RIM_LIGHT_POSITION: [f32; 3] = [-8.0, -4.0, -6.0];
pub const SPECTRUM_RIM_HUE_SPEED: f32 = 0.1; // hue turns per time unit
pub const SPECTRUM_EMISSIVE: f32 = 0.25;
pub const SPECTRUM_FOV_DEG: f32 = 60.0;
pub const SPECTRUM_BAR_SIZE: f32 = 0.35;
pub const SPECTRUM_BAR_COEF: f32 = 6.0;
pub const SPECTRUM_RING_RADIUS: f32 = 7.0;
pub const SPECTRUM_SPHERE_SIZE: f32 = 2.0;
pub const SPECTRUM_SPHERE_DETAIL: u32 = 3;
pub const SPECTRUM_SPHERE_SCALE_COEF: f32 = 0.6;
pub const SPECTRUM_ROT_BASE: [f32; 2] = [0.002, 0.004];
pub const SPECTRUM_ROT_FREQ_FACTOR: f32 = 0.00003;
pub const SPECTRUM_PARTICLE_COUNT: usize = 2000;
pub const SPECTRUM_PARTICLE_RADIUS: (f32, f32) = (10.0, 18.0);
pub const SPECTRUM_PARTICLE_SPIN: f32 = 0.001;
pub const SPECTRUM_PARTICLE_SPIN_FREQ: f32 = 0.00001;
pub const SPECTRUM_PARTICLE_SCALE_COEF: f32 = 0.3;
pub const SPECTRUM_KEY_LIGHT: (f32, f32) = (0.8, 3.0);
pub const SPECTRUM_RIM_LIGHT: (f32, f32) = (0.5, 1.5);
pub const SPECTRUM_BLOOM_STRENGTH: (f32, f32) = (0.4, 2.2);
pub const SPECTRUM_BLOOM_RADIUS: (f32, f32) = (0.2, 0.8);
pub const SPECTRUM_BLOOM_THRESHOLD: (f32, f32) = (0.9, -0.7);
pub const SPECTRUM_ORBIT_SPEED: f32 = 0.1;
pub const SPECTRUM_ORBIT_RADIUS: f32 = 18.0;
pub const SPECTRUM_CAMERA_HEIGHT: f32 = 4.0;
pub const SPECTRUM_CAMERA_BOB_SPEED: f32 = 0.05;
pub const SPECTRUM_CAMERA_BOB_RANGE: f32 = 3.0;

// Background
pub const CLEAR_COLOR: [f32; 4] = [0.01, 0.01, 0.03, 1.0];
