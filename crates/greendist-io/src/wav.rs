//! WAV file reading and writing.
//!
//! Files are loaded into an [`AudioBuffer`] of de-interleaved channels. Only
//! mono and stereo are accepted, matching what the processor supports.

use crate::{Error, Result};
use greendist_core::linear_to_db;
use greendist_effects::ConfigError;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample: 16 or 24 (integer) or 32 (float).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// De-interleaved multi-channel audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioBuffer {
    /// One sample vector per channel, all the same length.
    pub channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Wrap per-channel sample vectors.
    pub fn new(channels: Vec<Vec<f32>>) -> Self {
        debug_assert!(channels.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { channels }
    }

    /// `channels` channels of `frames` silent samples.
    pub fn silent(channels: usize, frames: usize) -> Self {
        Self::new(vec![vec![0.0; frames]; channels])
    }

    /// Split interleaved samples into `channels` channels.
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Self {
        let channels = channels.max(1);
        let mut out = vec![Vec::with_capacity(samples.len() / channels); channels];
        for frame in samples.chunks_exact(channels) {
            for (channel, &sample) in out.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(out)
    }

    /// Interleave all channels frame by frame.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.len() * self.channel_count());
        for frame in 0..self.len() {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Frames present in every channel (the shortest channel's length).
    pub fn len(&self) -> usize {
        self.channels.iter().map(Vec::len).min().unwrap_or(0)
    }

    /// `true` when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest absolute sample across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0_f32, |max, s| max.max(s.abs()))
    }

    /// RMS level across all channels.
    pub fn rms(&self) -> f32 {
        let count: usize = self.channels.iter().map(Vec::len).sum();
        if count == 0 {
            return 0.0;
        }
        let sum: f32 = self.channels.iter().flatten().map(|s| s * s).sum();
        (sum / count as f32).sqrt()
    }

    /// [`peak`](Self::peak) in dBFS.
    pub fn peak_db(&self) -> f32 {
        linear_to_db(self.peak())
    }

    /// [`rms`](Self::rms) in dBFS.
    pub fn rms_db(&self) -> f32 {
        linear_to_db(self.rms())
    }
}

fn int_scale(bits: u16) -> f32 {
    (1_i64 << (bits.clamp(1, 32) - 1)) as f32
}

/// Read a mono or stereo WAV file into de-interleaved channels.
///
/// Integer files are scaled into \[-1.0, 1.0). Any other channel count is
/// rejected with [`ConfigError::UnsupportedChannelCount`].
///
/// # Example
/// ```ignore
/// let (audio, spec) = read_wav("input.wav")?;
/// println!("Loaded {} frames at {} Hz", audio.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(AudioBuffer, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());
    let channels = spec.channels as usize;
    if !(1..=2).contains(&channels) {
        return Err(ConfigError::UnsupportedChannelCount(channels).into());
    }

    let samples: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let audio = AudioBuffer::from_interleaved(&samples, channels);
    tracing::debug!(
        "read_wav: {} ({} ch, {} Hz, {} bit, {} frames)",
        path.display(),
        channels,
        spec.sample_rate,
        spec.bits_per_sample,
        audio.len()
    );
    Ok((audio, spec))
}

/// Write `audio` to a WAV file.
///
/// The channel count comes from `audio`, not `spec`. 16- and 24-bit files are
/// written as clamped integers, 32-bit as float.
///
/// # Example
/// ```ignore
/// let audio = AudioBuffer::silent(2, 48000); // 1 second of stereo silence
/// write_wav("output.wav", &audio, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, audio: &AudioBuffer, spec: WavSpec) -> Result<()> {
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedBitDepth(spec.bits_per_sample));
    }
    let channels = audio.channel_count();
    if !(1..=2).contains(&channels) {
        return Err(ConfigError::UnsupportedChannelCount(channels).into());
    }

    let spec = WavSpec {
        channels: channels as u16,
        ..spec
    };
    let path = path.as_ref();
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    let interleaved = audio.to_interleaved();
    if spec.bits_per_sample == 32 {
        for &sample in &interleaved {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = int_scale(spec.bits_per_sample);
        for &sample in &interleaved {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    tracing::debug!(
        "write_wav: {} ({} ch, {} bit, {} frames)",
        path.display(),
        channels,
        spec.bits_per_sample,
        audio.len()
    );
    Ok(())
}
