//! Audio file I/O and offline hosting for the greendist distortion.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for mono and stereo files
//! - **Offline hosting**: [`OfflineHost`] runs a [`BlockPipeline`] over a whole
//!   [`AudioBuffer`] in host-sized blocks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greendist_effects::{Param, ProcessorConfig, negotiate_layout};
//! use greendist_io::{OfflineHost, read_wav, write_wav};
//!
//! # fn main() -> greendist_io::Result<()> {
//! let (mut audio, spec) = read_wav("input.wav")?;
//! let layout = negotiate_layout(audio.channel_count(), audio.channel_count())?;
//!
//! let mut host = OfflineHost::new(ProcessorConfig::new(spec.sample_rate as f32, 512, layout))?;
//! host.params().set(Param::Drive, 0.8);
//! host.process(&mut audio, |_, _| {});
//!
//! write_wav("output.wav", &audio, spec)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`BlockPipeline`]: greendist_effects::BlockPipeline

mod host;
mod wav;

pub use host::OfflineHost;
pub use wav::{AudioBuffer, WavSpec, read_wav, write_wav};

use greendist_effects::ConfigError;

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file or requested processing setup cannot be handled.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bit depth other than 16, 24 or 32.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
