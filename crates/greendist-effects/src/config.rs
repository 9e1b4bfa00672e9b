//! Channel-layout negotiation and processor configuration.
//!
//! Everything fallible about setting the processor up is checked here, before
//! the first block. Once a [`ProcessorConfig`] validates, the pipeline can
//! run without any error path.

use crate::error::ConfigError;

/// Supported bus layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelLayout {
    /// One channel.
    Mono,
    /// Two channels, processed independently.
    #[default]
    Stereo,
}

impl ChannelLayout {
    /// Layout for a channel count, or [`ConfigError::UnsupportedChannelCount`].
    pub fn from_channel_count(channels: usize) -> Result<Self, ConfigError> {
        match channels {
            1 => Ok(ChannelLayout::Mono),
            2 => Ok(ChannelLayout::Stereo),
            n => Err(ConfigError::UnsupportedChannelCount(n)),
        }
    }

    /// Number of channels in this layout.
    pub const fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }
}

/// Negotiate a bus layout: output must be mono or stereo and input must match.
///
/// ```rust
/// use greendist_effects::{ChannelLayout, ConfigError, negotiate_layout};
///
/// assert_eq!(negotiate_layout(2, 2), Ok(ChannelLayout::Stereo));
/// assert_eq!(
///     negotiate_layout(1, 2),
///     Err(ConfigError::MismatchedLayout { inputs: 1, outputs: 2 })
/// );
/// ```
pub fn negotiate_layout(inputs: usize, outputs: usize) -> Result<ChannelLayout, ConfigError> {
    let layout = ChannelLayout::from_channel_count(outputs)?;
    if inputs != outputs {
        return Err(ConfigError::MismatchedLayout { inputs, outputs });
    }
    Ok(layout)
}

/// Whether a host bus arrangement can be accepted.
pub fn is_layout_supported(inputs: usize, outputs: usize) -> bool {
    negotiate_layout(inputs, outputs).is_ok()
}

/// Everything the host tells the processor before processing starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessorConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Longest block the host will ever pass in one call.
    pub max_block_size: usize,
    /// Negotiated channel layout.
    pub layout: ChannelLayout,
}

impl ProcessorConfig {
    /// Create a config. Call [`validate`](Self::validate) before use.
    pub fn new(sample_rate: f32, max_block_size: usize, layout: ChannelLayout) -> Self {
        Self {
            sample_rate,
            max_block_size,
            layout,
        }
    }

    /// Check sample rate and block size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::InvalidBlockSize);
        }
        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new(48000.0, 512, ChannelLayout::Stereo)
    }
}
