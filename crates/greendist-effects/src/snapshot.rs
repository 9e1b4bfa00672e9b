//! Per-block parameter snapshot.

use crate::params::{Param, ParamSource};

/// Plain parameter values read once at the start of a block.
///
/// Every stage of the block sees the same values. No clamping happens here;
/// the store already enforces declared ranges and the filter stages clamp
/// cutoffs on their own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Waveshaper drive, 0.0–1.0.
    pub drive: f32,
    /// Lowpass cutoff in Hz.
    pub tone_hz: f32,
    /// Highpass cutoff in Hz.
    pub highpass_hz: f32,
    /// Dry/wet blend, 0.0–1.0.
    pub mix: f32,
    /// Output trim in dB.
    pub output_db: f32,
}

impl ParameterSnapshot {
    /// Read each parameter once from `source`.
    #[inline]
    pub fn capture<S: ParamSource + ?Sized>(source: &S) -> Self {
        Self {
            drive: source.value(Param::Drive),
            tone_hz: source.value(Param::Tone),
            highpass_hz: source.value(Param::Highpass),
            mix: source.value(Param::Mix),
            output_db: source.value(Param::Output),
        }
    }

    /// Snapshot holding every parameter's default.
    pub fn defaults() -> Self {
        Self {
            drive: Param::Drive.descriptor().default,
            tone_hz: Param::Tone.descriptor().default,
            highpass_hz: Param::Highpass.descriptor().default,
            mix: Param::Mix.descriptor().default,
            output_db: Param::Output.descriptor().default,
        }
    }

    /// Builder-style override of one value.
    pub fn with(mut self, param: Param, value: f32) -> Self {
        match param {
            Param::Drive => self.drive = value,
            Param::Tone => self.tone_hz = value,
            Param::Highpass => self.highpass_hz = value,
            Param::Mix => self.mix = value,
            Param::Output => self.output_db = value,
        }
        self
    }
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ParamSource for ParameterSnapshot {
    #[inline]
    fn value(&self, param: Param) -> f32 {
        match param {
            Param::Drive => self.drive,
            Param::Tone => self.tone_hz,
            Param::Highpass => self.highpass_hz,
            Param::Mix => self.mix,
            Param::Output => self.output_db,
        }
    }
}
