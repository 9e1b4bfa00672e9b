//! Greendist Effects - the real-time distortion processing core
//!
//! This crate turns the primitives in `greendist-core` into the complete
//! per-block effect:
//!
//! - [`ParameterSnapshot`] - the five controls, read once per block
//! - [`waveshaper`] - `tanh(drive * x * 12)` saturation
//! - [`FilterStage`] - cached lowpass/highpass biquads with 1 Hz hysteresis
//! - [`mixer`] - linear dry/wet blend
//! - [`output_stage`] - dB output trim
//! - [`BlockPipeline`] - the prepared/unprepared state machine that runs them
//!
//! Around the core sit the [`ParamStore`] (lock-free parameter values shared
//! with a control thread) and the configuration boundary
//! ([`ProcessorConfig`], [`negotiate_layout`]), which is the only place an
//! error can be returned.
//!
//! ## Example
//!
//! ```rust
//! use greendist_effects::{BlockPipeline, ChannelLayout, Param, ParamStore, ProcessorConfig};
//!
//! let params = ParamStore::new();
//! params.set(Param::Tone, 6000.0);
//! params.set(Param::Mix, 0.7);
//!
//! let mut pipeline = BlockPipeline::new();
//! pipeline
//!     .prepare_with(&ProcessorConfig::new(44100.0, 512, ChannelLayout::Mono))
//!     .unwrap();
//!
//! let mut block = [0.25_f32; 512];
//! pipeline.process(&mut [&mut block[..]], 1, &params);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod filter_stage;
pub mod mixer;
pub mod output_stage;
pub mod params;
pub mod pipeline;
pub mod snapshot;
pub mod waveshaper;

/// Most channels the processor handles. Mono and stereo only.
pub const MAX_CHANNELS: usize = 2;

// Re-export main types at crate root
pub use config::{ChannelLayout, ProcessorConfig, is_layout_supported, negotiate_layout};
pub use error::ConfigError;
pub use filter_stage::{FilterKind, FilterStage};
pub use params::{Param, ParamSource, ParamStore};
pub use pipeline::{BlockPipeline, PipelineState};
pub use snapshot::ParameterSnapshot;
