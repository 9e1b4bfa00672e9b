//! Per-block orchestration of the distortion chain.
//!
//! [`BlockPipeline`] owns everything that lives on the audio thread: the two
//! filter stages (shared coefficients, per-channel delay memory) and the
//! preallocated dry copy used by the mixer. Parameters come in through a
//! [`ParamSource`] and are read once per block.
//!
//! ```text
//! input ─┬─► waveshape ─► lowpass ─► highpass ─┬─► mix ─► output gain ─► out
//!        └────────────── dry copy ─────────────┘
//! ```
//!
//! # Lifecycle
//!
//! A pipeline starts [`PipelineState::Unprepared`] and passes audio through
//! untouched until [`BlockPipeline::prepare`] is called. It can be prepared
//! again at any time, which re-designs both filters at their default cutoff
//! and zeroes delay memory.

use alloc::vec::Vec;

use crate::MAX_CHANNELS;
use crate::config::{ChannelLayout, ProcessorConfig};
use crate::error::ConfigError;
use crate::filter_stage::{FilterKind, FilterStage};
use crate::mixer::mix_block;
use crate::output_stage::{apply_gain, linear_gain};
use crate::params::ParamSource;
use crate::snapshot::ParameterSnapshot;
use crate::waveshaper::waveshape_block;

/// Sample rate assumed when `prepare` is handed something unusable.
pub const FALLBACK_SAMPLE_RATE: f32 = 48000.0;

/// Dry-copy capacity used before the host reports a block size.
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 512;

/// Lifecycle state of a [`BlockPipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No sample rate yet; `process` is a no-op.
    Unprepared,
    /// Ready to process blocks.
    Prepared,
}

/// The complete per-block processor.
///
/// # Example
///
/// ```rust
/// use greendist_effects::{BlockPipeline, Param, ParamStore};
///
/// let params = ParamStore::new();
/// params.set(Param::Drive, 0.8);
///
/// let mut pipeline = BlockPipeline::new();
/// pipeline.prepare(48000.0, 256);
///
/// let mut left = [0.1_f32; 256];
/// let mut right = [-0.1_f32; 256];
/// pipeline.process(&mut [&mut left[..], &mut right[..]], 2, &params);
/// assert!(left[255] > 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct BlockPipeline {
    state: PipelineState,
    sample_rate: f32,
    max_block_size: usize,
    layout: ChannelLayout,
    lowpass: FilterStage,
    highpass: FilterStage,
    dry: [Vec<f32>; MAX_CHANNELS],
}

impl BlockPipeline {
    /// Create an unprepared stereo pipeline.
    pub fn new() -> Self {
        Self {
            state: PipelineState::Unprepared,
            sample_rate: FALLBACK_SAMPLE_RATE,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
            layout: ChannelLayout::Stereo,
            lowpass: FilterStage::new(FilterKind::Lowpass, FALLBACK_SAMPLE_RATE),
            highpass: FilterStage::new(FilterKind::Highpass, FALLBACK_SAMPLE_RATE),
            dry: [Vec::new(), Vec::new()],
        }
    }

    /// Enter (or re-enter) the prepared state.
    ///
    /// Both filters are designed at 20 Hz and their delay memory is zeroed.
    /// The dry copy is sized for `max_block_size` samples per channel; this is
    /// the only allocation the pipeline makes. A non-finite or non-positive
    /// `sample_rate` falls back to [`FALLBACK_SAMPLE_RATE`], and a zero block
    /// size is treated as one sample.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        let sample_rate = if sample_rate.is_finite() && sample_rate > 0.0 {
            sample_rate
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "pipeline_prepare: invalid sample rate {sample_rate}, using {FALLBACK_SAMPLE_RATE}"
            );
            FALLBACK_SAMPLE_RATE
        };
        let max_block_size = max_block_size.max(1);

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        self.lowpass.prepare(sample_rate);
        self.highpass.prepare(sample_rate);
        for dry in &mut self.dry {
            dry.clear();
            dry.resize(max_block_size, 0.0);
        }
        self.state = PipelineState::Prepared;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "pipeline_prepare: {sample_rate} Hz, max block {max_block_size}, {:?}",
            self.layout
        );
    }

    /// Validate `config`, record its layout and [`prepare`](Self::prepare).
    ///
    /// On error the pipeline is left exactly as it was.
    pub fn prepare_with(&mut self, config: &ProcessorConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.layout = config.layout;
        self.prepare(config.sample_rate, config.max_block_size);
        Ok(())
    }

    /// Zero all filter delay memory, keeping coefficients and state.
    pub fn reset(&mut self) {
        self.lowpass.reset();
        self.highpass.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!("pipeline_reset");
    }

    /// Process one host block in place.
    ///
    /// `buffer` holds one slice per output channel. Channels at index
    /// `num_input_channels` and above are silenced; of the rest, at most as
    /// many as the layout allows (two at most) are processed and any others
    /// are silenced too. Processed channels are expected to share a length;
    /// only the shortest length is processed.
    ///
    /// Parameters are read once. Blocks longer than the prepared maximum are
    /// processed in chunks with that same snapshot.
    ///
    /// While unprepared the buffer is left untouched.
    pub fn process<S: ParamSource + ?Sized>(
        &mut self,
        buffer: &mut [&mut [f32]],
        num_input_channels: usize,
        params: &S,
    ) {
        if self.state == PipelineState::Unprepared {
            return;
        }

        // 1. silence outputs with no matching input
        let active = num_input_channels
            .min(self.layout.channel_count())
            .min(buffer.len());
        for channel in buffer.iter_mut().skip(active) {
            channel.fill(0.0);
        }

        // 2. snapshot
        let snap = ParameterSnapshot::capture(params);
        self.lowpass.update_if_changed(snap.tone_hz);
        self.highpass.update_if_changed(snap.highpass_hz);
        let gain = linear_gain(snap.output_db);

        let len = buffer[..active].iter().map(|c| c.len()).min().unwrap_or(0);
        let mut start = 0;
        while start < len {
            let end = (start + self.max_block_size).min(len);
            self.process_chunk(&mut buffer[..active], start, end, &snap, gain);
            start = end;
        }
    }

    fn process_chunk(
        &mut self,
        channels: &mut [&mut [f32]],
        start: usize,
        end: usize,
        snap: &ParameterSnapshot,
        gain: f32,
    ) {
        let n = end - start;

        // 3. dry copy
        for (dry, channel) in self.dry.iter_mut().zip(channels.iter()) {
            dry[..n].copy_from_slice(&channel[start..end]);
        }

        // 4. waveshape
        for channel in channels.iter_mut() {
            waveshape_block(snap.drive, &mut channel[start..end]);
        }

        // 5. lowpass
        for (ch, channel) in channels.iter_mut().enumerate() {
            self.lowpass.process(ch, &mut channel[start..end]);
        }

        // 6. highpass
        for (ch, channel) in channels.iter_mut().enumerate() {
            self.highpass.process(ch, &mut channel[start..end]);
        }

        // 7. mix
        for (dry, channel) in self.dry.iter().zip(channels.iter_mut()) {
            mix_block(&dry[..n], &mut channel[start..end], snap.mix);
        }

        // 8. output gain
        for channel in channels.iter_mut() {
            apply_gain(&mut channel[start..end], gain);
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// `true` once [`prepare`](Self::prepare) has been called.
    pub fn is_prepared(&self) -> bool {
        self.state == PipelineState::Prepared
    }

    /// Sample rate in use.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Largest chunk processed in one pass.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Channel layout recorded by [`prepare_with`](Self::prepare_with).
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// The tone (lowpass) stage.
    pub fn lowpass(&self) -> &FilterStage {
        &self.lowpass
    }

    /// The highpass stage.
    pub fn highpass(&self) -> &FilterStage {
        &self.highpass
    }

    /// Reported processing latency. Always zero.
    pub fn latency_samples(&self) -> usize {
        0
    }

    /// Reported tail length. Always zero.
    pub fn tail_length_seconds(&self) -> f64 {
        0.0
    }
}

impl Default for BlockPipeline {
    fn default() -> Self {
        Self::new()
    }
}
