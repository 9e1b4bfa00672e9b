//! Post-distortion tone shaping: one cached biquad design, per-channel state.
//!
//! A [`FilterStage`] owns a single [`BiquadCoefficients`] set for its
//! [`FilterKind`] and one [`BiquadState`] per channel. The coefficient set is
//! shared; the delay memory is not, so left and right never leak into each
//! other.
//!
//! Coefficients are recomputed only when the clamped target cutoff moves more
//! than [`HYSTERESIS_HZ`] away from the cutoff they were designed for. Small
//! automation jitter therefore never touches the filter, while a slow sweep
//! still lands on the target once the accumulated change crosses the band.

use crate::MAX_CHANNELS;
use greendist_core::{BUTTERWORTH_Q, BiquadCoefficients, BiquadState};

/// Lowest accepted cutoff in Hz.
pub const MIN_CUTOFF_HZ: f32 = 20.0;

/// Highest accepted cutoff in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20000.0;

/// Cutoff both filter kinds are designed at by [`FilterStage::prepare`].
pub const DEFAULT_CUTOFF_HZ: f32 = 20.0;

/// Minimum cutoff change (Hz) that triggers a coefficient recomputation.
pub const HYSTERESIS_HZ: f32 = 1.0;

/// Design frequencies are kept below this fraction of the sample rate so a
/// 20 kHz cutoff stays stable at low sample rates.
const NYQUIST_GUARD: f32 = 0.49;

/// Which response a [`FilterStage`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Second-order Butterworth low-pass (the "tone" control).
    Lowpass,
    /// Second-order Butterworth high-pass.
    Highpass,
}

impl FilterKind {
    /// Designs a coefficient set for `cutoff_hz` at `sample_rate`.
    pub fn design(self, cutoff_hz: f32, sample_rate: f32) -> BiquadCoefficients {
        let frequency = cutoff_hz.min(sample_rate * NYQUIST_GUARD);
        match self {
            FilterKind::Lowpass => BiquadCoefficients::lowpass(frequency, BUTTERWORTH_Q, sample_rate),
            FilterKind::Highpass => {
                BiquadCoefficients::highpass(frequency, BUTTERWORTH_Q, sample_rate)
            }
        }
    }
}

/// One filter kind applied independently to up to two channels.
#[derive(Debug, Clone)]
pub struct FilterStage {
    kind: FilterKind,
    sample_rate: f32,
    coeffs: BiquadCoefficients,
    cached_cutoff: f32,
    channels: [BiquadState; MAX_CHANNELS],
    updates: u64,
}

impl FilterStage {
    /// Create a stage designed at [`DEFAULT_CUTOFF_HZ`] for `sample_rate`.
    pub fn new(kind: FilterKind, sample_rate: f32) -> Self {
        let mut stage = Self {
            kind,
            sample_rate,
            coeffs: BiquadCoefficients::PASSTHROUGH,
            cached_cutoff: DEFAULT_CUTOFF_HZ,
            channels: [BiquadState::new(), BiquadState::new()],
            updates: 0,
        };
        stage.prepare(sample_rate);
        stage
    }

    /// Reset for a (new) sample rate.
    ///
    /// Designs coefficients at [`DEFAULT_CUTOFF_HZ`], records that cutoff as
    /// cached, and zeroes every channel's delay memory.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.cached_cutoff = DEFAULT_CUTOFF_HZ;
        self.coeffs = self.kind.design(DEFAULT_CUTOFF_HZ, sample_rate);
        self.reset();
    }

    /// Recompute coefficients if the clamped target moved past the
    /// hysteresis band.
    ///
    /// Returns `true` when a recomputation happened. A NaN target never
    /// triggers one.
    #[inline]
    pub fn update_if_changed(&mut self, target_cutoff: f32) -> bool {
        let cutoff = target_cutoff.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ);
        if (cutoff - self.cached_cutoff).abs() > HYSTERESIS_HZ {
            self.coeffs = self.kind.design(cutoff, self.sample_rate);
            self.cached_cutoff = cutoff;
            self.updates += 1;
            true
        } else {
            false
        }
    }

    /// Filter one channel's samples in place, in sample order.
    ///
    /// Channels beyond [`MAX_CHANNELS`] are left untouched.
    #[inline]
    pub fn process(&mut self, channel: usize, buffer: &mut [f32]) {
        if let Some(state) = self.channels.get_mut(channel) {
            state.process_block(&self.coeffs, buffer);
        }
    }

    /// Zero all delay memory, keeping the current coefficients.
    pub fn reset(&mut self) {
        for state in &mut self.channels {
            state.clear();
        }
    }

    /// Filter response of this stage.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Cutoff the current coefficients were designed for.
    pub fn cached_cutoff(&self) -> f32 {
        self.cached_cutoff
    }

    /// Current coefficient set.
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coeffs
    }

    /// Sample rate passed to the last [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Number of hysteresis-gated recomputations since creation.
    pub fn coefficient_updates(&self) -> u64 {
        self.updates
    }

    /// Delay memory of one channel, if it exists.
    pub fn channel_state(&self, channel: usize) -> Option<&BiquadState> {
        self.channels.get(channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44100.0;

    #[test]
    fn prepare_designs_default_cutoff() {
        let stage = FilterStage::new(FilterKind::Lowpass, SR);
        assert_eq!(stage.cached_cutoff(), DEFAULT_CUTOFF_HZ);
        assert_eq!(
            *stage.coefficients(),
            FilterKind::Lowpass.design(DEFAULT_CUTOFF_HZ, SR)
        );
        assert_eq!(stage.coefficient_updates(), 0);
    }

    #[test]
    fn update_is_idempotent() {
        let mut stage = FilterStage::new(FilterKind::Lowpass, SR);
        assert!(stage.update_if_changed(5000.0));
        assert!(!stage.update_if_changed(5000.0));
        assert_eq!(stage.coefficient_updates(), 1);
        assert_eq!(stage.cached_cutoff(), 5000.0);
    }

    #[test]
    fn sub_hertz_changes_are_ignored() {
        let mut stage = FilterStage::new(FilterKind::Highpass, SR);
        stage.update_if_changed(1000.0);
        let coeffs = *stage.coefficients();

        assert!(!stage.update_if_changed(1000.9));
        assert!(!stage.update_if_changed(999.1));
        assert!(!stage.update_if_changed(1001.0));
        assert_eq!(*stage.coefficients(), coeffs);
        assert_eq!(stage.coefficient_updates(), 1);

        assert!(stage.update_if_changed(1001.5));
    }

    #[test]
    fn target_is_clamped_for_both_kinds() {
        for kind in [FilterKind::Lowpass, FilterKind::Highpass] {
            let mut stage = FilterStage::new(kind, SR);
            stage.update_if_changed(96000.0);
            assert_eq!(stage.cached_cutoff(), MAX_CUTOFF_HZ);

            stage.update_if_changed(-5.0);
            assert_eq!(stage.cached_cutoff(), MIN_CUTOFF_HZ);
        }
    }

    #[test]
    fn nan_target_keeps_coefficients() {
        let mut stage = FilterStage::new(FilterKind::Lowpass, SR);
        stage.update_if_changed(3000.0);
        assert!(!stage.update_if_changed(f32::NAN));
        assert_eq!(stage.cached_cutoff(), 3000.0);
    }

    #[test]
    fn high_cutoff_is_stable_at_low_sample_rate() {
        let mut stage = FilterStage::new(FilterKind::Lowpass, 22050.0);
        stage.update_if_changed(20000.0);

        let mut buffer: Vec<f32> = (0..4096).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        stage.process(0, &mut buffer);
        assert!(buffer.iter().all(|s| s.is_finite() && s.abs() < 10.0));
    }

    #[test]
    fn channels_keep_separate_history() {
        let mut stage = FilterStage::new(FilterKind::Lowpass, SR);
        stage.update_if_changed(500.0);

        let mut left = [1.0_f32; 64];
        stage.process(0, &mut left);

        // Right channel has seen nothing yet: silence in, silence out.
        let mut right = [0.0_f32; 64];
        stage.process(1, &mut right);
        assert!(right.iter().all(|&s| s == 0.0));
        assert!(stage.channel_state(1).is_some_and(BiquadState::is_clear));
    }

    #[test]
    fn prepare_zeroes_delay_memory() {
        let mut stage = FilterStage::new(FilterKind::Highpass, SR);
        let mut buffer = [0.5_f32; 32];
        stage.process(0, &mut buffer);
        stage.process(1, &mut buffer);

        stage.prepare(48000.0);
        assert_eq!(stage.sample_rate(), 48000.0);
        assert!(stage.channel_state(0).is_some_and(BiquadState::is_clear));
        assert!(stage.channel_state(1).is_some_and(BiquadState::is_clear));
    }

    #[test]
    fn out_of_range_channel_is_ignored() {
        let mut stage = FilterStage::new(FilterKind::Lowpass, SR);
        let mut buffer = [0.25_f32; 8];
        stage.process(2, &mut buffer);
        assert_eq!(buffer, [0.25; 8]);
    }

    #[test]
    fn tracks_band_edges() {
        let mut lp = FilterStage::new(FilterKind::Lowpass, SR);
        lp.update_if_changed(1000.0);
        let c = lp.coefficients();
        assert!((c.magnitude_at(100.0, SR) - 1.0).abs() < 0.01);
        assert!((c.magnitude_at(1000.0, SR) - BUTTERWORTH_Q).abs() < 0.01);
        assert!(c.magnitude_at(10000.0, SR) < 0.02);

        let mut hp = FilterStage::new(FilterKind::Highpass, SR);
        hp.update_if_changed(1000.0);
        let c = hp.coefficients();
        assert!((c.magnitude_at(10000.0, SR) - 1.0).abs() < 0.01);
        assert!(c.magnitude_at(100.0, SR) < 0.02);
    }
}
