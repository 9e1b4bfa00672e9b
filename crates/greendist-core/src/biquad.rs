//! Biquad (bi-quadratic) filter structure.
//!
//! Splits a second-order IIR filter into two parts:
//!
//! - [`BiquadCoefficients`] - the normalized coefficient set, cheap to copy and
//!   shareable between channels
//! - [`BiquadState`] - the per-channel delay memory that the recursion runs on
//!
//! Keeping them apart lets one coefficient set drive several channels while
//! each channel owns its own history, so left and right never leak into each
//! other.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use crate::math::flush_denormal;
use core::f32::consts::PI;
use libm::{cosf, sinf, sqrtf};

/// Q factor for a maximally flat (Butterworth) second-order response: 1/√2.
pub const BUTTERWORTH_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Normalized biquad coefficients.
///
/// Implements the Direct Form I transfer function:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
/// with `a0` already divided out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
}

impl BiquadCoefficients {
    /// Identity coefficients: `y[n] = x[n]`.
    pub const PASSTHROUGH: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds a coefficient set from raw cookbook values, normalizing by `a0`.
    pub fn from_raw(b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Second-order low-pass at `frequency` Hz.
    pub fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(frequency, q, sample_rate);
        Self::from_raw(b0, b1, b2, a0, a1, a2)
    }

    /// Second-order high-pass at `frequency` Hz.
    pub fn highpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let (b0, b1, b2, a0, a1, a2) = highpass_coefficients(frequency, q, sample_rate);
        Self::from_raw(b0, b1, b2, a0, a1, a2)
    }

    /// Magnitude of the frequency response at `frequency` Hz (linear gain).
    ///
    /// Evaluates `|H(e^jω)|` directly from the coefficients. Intended for
    /// analysis and tests, not the audio path.
    pub fn magnitude_at(&self, frequency: f32, sample_rate: f32) -> f32 {
        let omega = 2.0 * PI * frequency / sample_rate;
        let (c1, s1) = (cosf(omega), sinf(omega));
        let (c2, s2) = (cosf(2.0 * omega), sinf(2.0 * omega));

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);

        sqrtf(num_re * num_re + num_im * num_im) / sqrtf(den_re * den_re + den_im * den_im)
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::PASSTHROUGH
    }
}

/// Delay memory for one channel of a biquad.
///
/// Holds `x[n-1]`, `x[n-2]`, `y[n-1]`, `y[n-2]`. The recursion is strictly
/// sequential: each output depends on the previous inputs and outputs of
/// this state only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BiquadState {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BiquadState {
    /// Creates a cleared state.
    pub const fn new() -> Self {
        Self {
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample with the given coefficients.
    ///
    /// Uses Direct Form I structure for numerical stability. The fed-back
    /// output is flushed of denormals so a decaying tail cannot stall the CPU.
    #[inline]
    pub fn process(&mut self, coeffs: &BiquadCoefficients, input: f32) -> f32 {
        #[rustfmt::skip]
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
                                        - coeffs.a1 * self.y1 - coeffs.a2 * self.y2;
        let output = flush_denormal(output);

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Filters `buffer` in place, in sample order.
    #[inline]
    pub fn process_block(&mut self, coeffs: &BiquadCoefficients, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(coeffs, *sample);
        }
    }

    /// Clears the delay memory.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns `true` if all delay memory is zero.
    pub fn is_clear(&self) -> bool {
        self.x1 == 0.0 && self.x2 == 0.0 && self.y1 == 0.0 && self.y2 == 0.0
    }
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (use [`BUTTERWORTH_Q`] for a flat passband)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn lowpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates high-pass filter coefficients using the RBJ cookbook formula.
///
/// # Arguments
///
/// * `frequency` - Cutoff frequency in Hz
/// * `q` - Q factor (use [`BUTTERWORTH_Q`] for a flat passband)
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients
pub fn highpass_coefficients(
    frequency: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 + cos_omega) / 2.0;
    let b1 = -(1.0 + cos_omega);
    let b2 = (1.0 + cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        let coeffs = BiquadCoefficients::PASSTHROUGH;
        let mut state = BiquadState::new();

        for i in 0..10 {
            let input = i as f32 * 0.1;
            let output = state.process(&coeffs, input);
            assert!((output - input).abs() < 0.0001);
        }
    }

    #[test]
    fn test_clear() {
        let coeffs = BiquadCoefficients::lowpass(1000.0, BUTTERWORTH_Q, 44100.0);
        let mut state = BiquadState::new();

        for _ in 0..10 {
            state.process(&coeffs, 1.0);
        }
        assert!(!state.is_clear());

        state.clear();
        assert!(state.is_clear());
    }

    #[test]
    fn test_from_raw_normalizes() {
        let coeffs = BiquadCoefficients::from_raw(2.0, 4.0, 2.0, 2.0, 1.0, 0.5);
        assert_eq!(
            coeffs,
            BiquadCoefficients::from_raw(1.0, 2.0, 1.0, 1.0, 0.5, 0.25)
        );
    }

    #[test]
    fn test_lowpass_coefficients_finite() {
        let (b0, b1, b2, a0, a1, a2) = lowpass_coefficients(1000.0, BUTTERWORTH_Q, 44100.0);

        assert!(b0.is_finite());
        assert!(b1.is_finite());
        assert!(b2.is_finite());
        assert!(a0.is_finite());
        assert!(a1.is_finite());
        assert!(a2.is_finite());
        assert!(a0 > 0.0);
    }

    #[test]
    fn test_lowpass_dc_pass() {
        let coeffs = BiquadCoefficients::lowpass(1000.0, BUTTERWORTH_Q, 44100.0);
        let mut state = BiquadState::new();

        let mut output = 0.0;
        for _ in 0..1000 {
            output = state.process(&coeffs, 1.0);
        }

        assert!((output - 1.0).abs() < 0.05, "DC should pass, got {output}");
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let coeffs = BiquadCoefficients::highpass(1000.0, BUTTERWORTH_Q, 44100.0);
        let mut state = BiquadState::new();

        let mut output = 1.0;
        for _ in 0..2000 {
            output = state.process(&coeffs, 1.0);
        }

        assert!(output.abs() < 0.01, "DC should be blocked, got {output}");
    }

    #[test]
    fn test_butterworth_cutoff_is_minus_3db() {
        let sr = 48000.0;
        for coeffs in [
            BiquadCoefficients::lowpass(1000.0, BUTTERWORTH_Q, sr),
            BiquadCoefficients::highpass(1000.0, BUTTERWORTH_Q, sr),
        ] {
            let mag = coeffs.magnitude_at(1000.0, sr);
            assert!(
                (mag - BUTTERWORTH_Q).abs() < 0.01,
                "Expected -3 dB (~0.707) at cutoff, got {mag}"
            );
        }
    }

    #[test]
    fn test_lowpass_rolloff_slope() {
        // Second order: ~12 dB/octave well above cutoff
        let sr = 96000.0;
        let coeffs = BiquadCoefficients::lowpass(500.0, BUTTERWORTH_Q, sr);
        let one = coeffs.magnitude_at(4000.0, sr);
        let two = coeffs.magnitude_at(8000.0, sr);
        let slope_db = 20.0 * libm::log10f(one / two);
        assert!(
            (slope_db - 12.0).abs() < 1.5,
            "Expected ~12 dB/oct, got {slope_db}"
        );
    }

    #[test]
    fn test_denormal_tail_is_flushed() {
        let coeffs = BiquadCoefficients::lowpass(100.0, BUTTERWORTH_Q, 48000.0);
        let mut state = BiquadState::new();
        state.process(&coeffs, 1.0);

        for _ in 0..200_000 {
            let out = state.process(&coeffs, 0.0);
            assert!(out == 0.0 || out.abs() >= 1e-20);
        }
    }
}
