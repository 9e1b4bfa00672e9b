//! Property-based tests for greendist-core DSP primitives.
//!
//! Tests filter stability, channel isolation and parameter normalization
//! using proptest for randomized input generation.

use proptest::prelude::*;
use greendist_core::{
    BUTTERWORTH_Q, BiquadCoefficients, BiquadState, ParamDescriptor, wet_dry_mix,
};

fn design(variant: usize, freq: f32, sample_rate: f32) -> BiquadCoefficients {
    match variant % 2 {
        0 => BiquadCoefficients::lowpass(freq, BUTTERWORTH_Q, sample_rate),
        _ => BiquadCoefficients::highpass(freq, BUTTERWORTH_Q, sample_rate),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// For any cutoff below Nyquist, low-pass and high-pass biquads produce
    /// finite output for random finite input.
    #[test]
    fn biquad_stability(
        freq in 20.0f32..20000.0f32,
        variant in 0usize..2,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let coeffs = design(variant, freq, 48000.0);
        let mut state = BiquadState::new();

        for &sample in &input {
            let out = state.process(&coeffs, sample);
            prop_assert!(
                out.is_finite(),
                "Biquad variant {} (freq={}) produced non-finite output {} for input {}",
                variant, freq, out, sample
            );
        }
    }

    /// Two states driven by the same coefficients never influence each other:
    /// channel B's output depends only on channel B's input.
    #[test]
    fn biquad_states_are_isolated(
        freq in 20.0f32..20000.0f32,
        variant in 0usize..2,
        a in prop::array::uniform32(-1.0f32..=1.0f32),
        b in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let coeffs = design(variant, freq, 44100.0);

        let mut shared_a = BiquadState::new();
        let mut shared_b = BiquadState::new();
        let mut alone_b = BiquadState::new();

        for (&xa, &xb) in a.iter().zip(b.iter()) {
            shared_a.process(&coeffs, xa);
            let together = shared_b.process(&coeffs, xb);
            let alone = alone_b.process(&coeffs, xb);
            prop_assert_eq!(together.to_bits(), alone.to_bits());
        }
    }

    /// Low-pass passes DC near unity; high-pass passes content near Nyquist
    /// near unity.
    #[test]
    fn biquad_passband_is_unity(freq in 100.0f32..5000.0f32) {
        let sr = 48000.0;
        let lp = BiquadCoefficients::lowpass(freq, BUTTERWORTH_Q, sr);
        let hp = BiquadCoefficients::highpass(freq, BUTTERWORTH_Q, sr);

        prop_assert!((lp.magnitude_at(1.0, sr) - 1.0).abs() < 0.01);
        prop_assert!((hp.magnitude_at(23000.0, sr) - 1.0).abs() < 0.01);
    }

    /// Normalization round-trips for the logarithmic frequency range.
    #[test]
    fn frequency_normalization_roundtrip(value in 20.0f32..20000.0f32) {
        let desc = ParamDescriptor::frequency_hz("Lowpass", "LP", 20.0, 20000.0, 20000.0);
        let n = desc.normalize(value);
        prop_assert!((0.0..=1.0).contains(&n));
        let back = desc.denormalize(n);
        prop_assert!((back - value).abs() / value < 1e-3);
    }

    /// The crossfade stays between its endpoints.
    #[test]
    fn wet_dry_mix_is_bounded(
        dry in -1.0f32..=1.0f32,
        wet in -1.0f32..=1.0f32,
        mix in 0.0f32..=1.0f32,
    ) {
        let out = wet_dry_mix(dry, wet, mix);
        let lo = dry.min(wet) - 1e-6;
        let hi = dry.max(wet) + 1e-6;
        prop_assert!(out >= lo && out <= hi);
    }
}
