//! Memoryless tanh waveshaper.
//!
//! `y = tanh(drive * x * K)` with `K = 12`. At full drive a 0.1 input already
//! sits at `tanh(1.2) ≈ 0.83`, so the control spans clean-ish to heavily
//! saturated. Drive 0 silences the wet path entirely.

use greendist_core::soft_clip;

/// Fixed pre-gain applied inside the nonlinearity.
pub const SHAPING_CONSTANT: f32 = 12.0;

/// Shape one sample.
///
/// ```rust
/// use greendist_effects::waveshaper::waveshape;
///
/// assert_eq!(waveshape(0.0, 0.7), 0.0);
/// assert!(waveshape(0.1, 0.5) < 1.0);
/// assert!(waveshape(1.0, 1.0) <= 1.0);
/// ```
#[inline]
pub fn waveshape(drive: f32, x: f32) -> f32 {
    soft_clip(drive * x * SHAPING_CONSTANT)
}

/// Shape every sample of `buffer` in place.
#[inline]
pub fn waveshape_block(drive: f32, buffer: &mut [f32]) {
    for sample in buffer.iter_mut() {
        *sample = waveshape(drive, *sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_tanh_law() {
        for &drive in &[0.0, 0.1, 0.5, 1.0] {
            for i in -10..=10 {
                let x = i as f32 / 10.0;
                assert_eq!(waveshape(drive, x), libm::tanhf(drive * x * 12.0));
            }
        }
    }

    #[test]
    fn zero_drive_is_silent() {
        let mut buffer = [0.9, -0.3, 1.0, -1.0, 0.0001];
        waveshape_block(0.0, &mut buffer);
        assert!(buffer.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn saturates_to_unity() {
        assert!((waveshape(1.0, 1.0) - 1.0).abs() < 1e-6);
        assert!((waveshape(1.0, -1.0) + 1.0).abs() < 1e-6);
        assert!(waveshape(1.0, 1e6).abs() <= 1.0);
    }

    #[test]
    fn is_odd_symmetric() {
        for i in 0..50 {
            let x = i as f32 / 50.0;
            assert_eq!(waveshape(0.7, x), -waveshape(0.7, -x));
        }
    }
}
