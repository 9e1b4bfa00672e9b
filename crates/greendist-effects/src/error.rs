//! Error types for processor configuration.
//!
//! These are raised only while negotiating a channel layout or validating a
//! [`ProcessorConfig`](crate::ProcessorConfig). The per-block path has no
//! error returns.

use thiserror::Error;

/// Errors that can occur while configuring the processor.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Only mono and stereo are supported.
    #[error("unsupported channel count {0} (expected 1 or 2)")]
    UnsupportedChannelCount(usize),

    /// Input and output buses must carry the same number of channels.
    #[error("input/output layout mismatch: {inputs} in, {outputs} out")]
    MismatchedLayout {
        /// Channels on the input bus.
        inputs: usize,
        /// Channels on the output bus.
        outputs: usize,
    },

    /// Sample rate must be finite and positive.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f32),

    /// Maximum block size must be at least one sample.
    #[error("maximum block size must be greater than zero")]
    InvalidBlockSize,
}
