//! Greendist Core - DSP primitives for the greendist distortion
//!
//! This crate provides the building blocks the processing core is made of,
//! designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Filters
//!
//! - [`BiquadCoefficients`] - RBJ cookbook low-pass/high-pass coefficient sets
//! - [`BiquadState`] - Per-channel Direct Form I delay memory
//!
//! # Parameters
//!
//! - [`ParamDescriptor`] - Range, default, unit and scaling of a control
//! - [`ParamId`], [`ParamUnit`], [`ParamScale`]
//!
//! # Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`soft_clip`],
//!   [`wet_dry_mix`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! greendist-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use greendist_core::{BUTTERWORTH_Q, BiquadCoefficients, BiquadState};
//!
//! let coeffs = BiquadCoefficients::lowpass(1000.0, BUTTERWORTH_Q, 48000.0);
//! let mut left = BiquadState::new();
//! let mut right = BiquadState::new();
//!
//! let mut l = [0.5_f32; 64];
//! let mut r = [-0.5_f32; 64];
//! left.process_block(&coeffs, &mut l);
//! right.process_block(&coeffs, &mut r);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod biquad;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use biquad::{
    BUTTERWORTH_Q, BiquadCoefficients, BiquadState, highpass_coefficients, lowpass_coefficients,
};
pub use math::{db_to_linear, flush_denormal, linear_to_db, soft_clip, wet_dry_mix};
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit};
