//! Native audio inputs: WAV playback and microphone capture.
//!
//! Both feed the same [`PcmTap`]; the frame loop analyses the tap with a
//! [`lounge_core::SpectrumAnalyser`].

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SizedSample};
use lounge_core::{MediaElement, MediaKind, SharedTap};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Decoded interleaved PCM.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub samples: Vec<f32>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl Clip {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let reader = hound::WavReader::open(path)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
        Ok(Self::decode(reader))
    }

    pub fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Self {
        let spec = reader.spec();
        let samples = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().map(|s| s.unwrap_or(0.0)).collect()
            }
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.unwrap_or(0) as f32 / max_val)
                    .collect()
            }
        };
        Self {
            samples,
            channels: spec.channels.max(1) as usize,
            sample_rate: spec.sample_rate,
        }
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    pub fn duration_secs(&self) -> f32 {
        self.frames() as f32 / self.sample_rate.max(1) as f32
    }
}

/// Reads a clip at the output device rate (nearest-frame resampling).
#[derive(Debug)]
pub struct Playhead {
    clip: Arc<Clip>,
    position: f64,
    step: f64,
}

impl Playhead {
    pub fn new(clip: Arc<Clip>, output_rate: u32) -> Self {
        let step = clip.sample_rate as f64 / output_rate.max(1) as f64;
        Self {
            clip,
            position: 0.0,
            step,
        }
    }

    /// Fill interleaved `out` with `channels` per frame, pushing one mono
    /// sample per frame into `mono`. Past the end of the clip writes silence.
    pub fn fill(&mut self, out: &mut [f32], channels: usize, mono: &mut Vec<f32>) {
        let channels = channels.max(1);
        let src_channels = self.clip.channels;
        for frame in out.chunks_mut(channels) {
            let index = self.position as usize;
            let src = self
                .clip
                .samples
                .get(index * src_channels..(index + 1) * src_channels);
            match src {
                Some(src) => {
                    for (c, sample) in frame.iter_mut().enumerate() {
                        *sample = src[c.min(src_channels - 1)];
                    }
                    mono.push(src.iter().sum::<f32>() / src_channels as f32);
                    self.position += self.step;
                }
                None => {
                    frame.fill(0.0);
                    mono.push(0.0);
                }
            }
        }
    }
}

/// A running cpal stream feeding the tap.
pub struct NativeMedia {
    label: String,
    stream: Option<cpal::Stream>,
    tap: SharedTap,
}

impl NativeMedia {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn play(&self) -> anyhow::Result<()> {
        match &self.stream {
            Some(stream) => stream
                .play()
                .map_err(|e| anyhow::anyhow!("start {}: {e}", self.label)),
            None => Err(anyhow::anyhow!("{} was already released", self.label)),
        }
    }
}

impl MediaElement for NativeMedia {
    fn kind(&self) -> MediaKind {
        MediaKind::Audio
    }

    fn pause(&mut self) {
        if let Some(stream) = &self.stream {
            _ = stream.pause();
        }
    }

    fn detach(&mut self) {
        self.stream = None;
        self.tap.lock().unwrap_or_else(|p| p.into_inner()).clear();
    }
}

fn err_fn(err: cpal::StreamError) {
    log::error!("[media] audio stream error: {err}");
}

/// Play a WAV file on the default output device.
pub fn open_wav(path: &Path, tap: SharedTap) -> anyhow::Result<NativeMedia> {
    let clip = Arc::new(Clip::open(path)?);
    let device = cpal::default_host()
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("no output device"))?;
    let config = device.default_output_config()?;
    log::info!(
        "[media] {}: {} ch @ {} Hz, {:.1}s -> {} ch @ {} Hz",
        path.display(),
        clip.channels,
        clip.sample_rate,
        clip.duration_secs(),
        config.channels(),
        config.sample_rate().0
    );
    tap.lock().unwrap_or_else(|p| p.into_inner()).clear();
    let playhead = Playhead::new(clip, config.sample_rate().0);
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_output::<f32>(&device, &config.into(), playhead, &tap)?,
        cpal::SampleFormat::I16 => build_output::<i16>(&device, &config.into(), playhead, &tap)?,
        cpal::SampleFormat::U16 => build_output::<u16>(&device, &config.into(), playhead, &tap)?,
        other => return Err(anyhow::anyhow!("unsupported output format {other:?}")),
    };
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(NativeMedia {
        label,
        stream: Some(stream),
        tap,
    })
}

fn build_output<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut playhead: Playhead,
    tap: &SharedTap,
) -> anyhow::Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let tap = tap.clone();
    let mut scratch = Vec::new();
    let mut mono = Vec::new();
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            scratch.resize(data.len(), 0.0);
            mono.clear();
            playhead.fill(&mut scratch, channels, &mut mono);
            for (dst, &src) in data.iter_mut().zip(scratch.iter()) {
                *dst = T::from_sample(src);
            }
            tap.lock()
                .unwrap_or_else(|p| p.into_inner())
                .push_interleaved(&mono, 1);
        },
        err_fn,
        None,
    )?;
    Ok(stream)
}

/// Capture the default input device.
pub fn open_microphone(tap: SharedTap) -> anyhow::Result<NativeMedia> {
    let device = cpal::default_host()
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("no input device"))?;
    let config = device.default_input_config()?;
    let name = device.name().unwrap_or_else(|_| "microphone".to_string());
    log::info!(
        "[media] capturing {name}: {} ch @ {} Hz",
        config.channels(),
        config.sample_rate().0
    );
    tap.lock().unwrap_or_else(|p| p.into_inner()).clear();
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => build_input::<f32>(&device, &config.into(), &tap)?,
        cpal::SampleFormat::I16 => build_input::<i16>(&device, &config.into(), &tap)?,
        cpal::SampleFormat::U16 => build_input::<u16>(&device, &config.into(), &tap)?,
        other => return Err(anyhow::anyhow!("unsupported input format {other:?}")),
    };
    Ok(NativeMedia {
        label: name,
        stream: Some(stream),
        tap,
    })
}

fn build_input<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tap: &SharedTap,
) -> anyhow::Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let tap = tap.clone();
    let mut converted = Vec::new();
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|&s| s.to_sample::<f32>()));
            tap.lock()
                .unwrap_or_else(|p| p.into_inner())
                .push_interleaved(&converted, channels);
        },
        err_fn,
        None,
    )?;
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn wav_bytes(channels: u16, frames: &[i16]) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in frames {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_int_samples_to_unit_range() {
        let bytes = wav_bytes(2, &[16384, -16384, 0, 32767]);
        let clip = Clip::decode(hound::WavReader::new(Cursor::new(bytes)).unwrap());
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.frames(), 2);
        assert_eq!(clip.samples[0], 0.5);
        assert_eq!(clip.samples[1], -0.5);
        assert!((clip.duration_secs() - 2.0 / 8000.0).abs() < 1e-9);
    }

    #[test]
    fn playhead_maps_channels_and_resamples() {
        let clip = Arc::new(Clip {
            samples: vec![0.2, 0.4, 0.6, 0.8],
            channels: 1,
            sample_rate: 8000,
        });
        // output at twice the clip rate repeats each frame
        let mut head = Playhead::new(clip, 16_000);
        let mut out = [0.0; 6];
        let mut mono = Vec::new();
        head.fill(&mut out, 2, &mut mono);
        assert_eq!(out, [0.2, 0.2, 0.2, 0.2, 0.4, 0.4]);
        assert_eq!(mono, vec![0.2, 0.2, 0.4]);
    }

    #[test]
    fn playhead_goes_silent_at_the_end() {
        let clip = Arc::new(Clip {
            samples: vec![1.0, -1.0],
            channels: 2,
            sample_rate: 44_100,
        });
        let mut head = Playhead::new(clip, 44_100);
        let mut out = [9.0; 4];
        let mut mono = Vec::new();
        head.fill(&mut out, 2, &mut mono);
        assert_eq!(out, [1.0, -1.0, 0.0, 0.0]);
        assert_eq!(mono, vec![0.0, 0.0]);
    }
}
