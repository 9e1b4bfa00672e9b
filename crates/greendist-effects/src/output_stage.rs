//! Output trim.
//!
//! The dB value is converted once per block; there is nothing to cache.

use greendist_core::db_to_linear;

/// Linear multiplier for an output trim of `output_db` decibels: `10^(dB/20)`.
///
/// ```rust
/// use greendist_effects::output_stage::linear_gain;
///
/// assert_eq!(linear_gain(0.0), 1.0);
/// assert!((linear_gain(24.0) - 15.85).abs() < 0.01);
/// assert!((linear_gain(-24.0) - 0.0631).abs() < 1e-4);
/// ```
#[inline]
pub fn linear_gain(output_db: f32) -> f32 {
    db_to_linear(output_db)
}

/// Multiply every sample of `buffer` by `gain`. Unity gain is a no-op.
#[inline]
pub fn apply_gain(buffer: &mut [f32], gain: f32) {
    if gain == 1.0 {
        return;
    }
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}
