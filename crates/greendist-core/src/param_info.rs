//! Parameter metadata for discoverable controls.
//!
//! Each control exposed by a processor is described by a [`ParamDescriptor`]
//! carrying everything a host, CLI or parameter store needs:
//!
//! - display name and short name
//! - [`ParamUnit`] for formatting
//! - range and default
//! - [`ParamId`] - stable numeric ID for automation and persistence
//! - `string_id` - human-readable stable ID (`"drive"`, `"tone"`, ...)
//! - [`ParamScale`] - normalization curve (linear, logarithmic)
//!
//! # Example
//!
//! ```rust
//! use greendist_core::{ParamDescriptor, ParamId};
//!
//! let cutoff = ParamDescriptor::frequency_hz("Lowpass", "LP", 20.0, 20000.0, 20000.0)
//!     .with_id(ParamId(1), "tone");
//!
//! assert_eq!(cutoff.clamp(50000.0), 20000.0);
//! assert!((cutoff.denormalize(cutoff.normalize(440.0)) - 440.0).abs() < 0.1);
//! ```

/// Scaling curve for parameter normalization.
///
/// Determines how a parameter's plain value maps to normalized \[0.0, 1.0\] space.
///
/// # Normalization Formulas
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    /// Ideal for frequency parameters (20 Hz → 20 kHz).
    /// Requires `min > 0.0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter:
/// hosts record automation and saved state against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Drive", "Lowpass").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the processor is created or reset.
    pub default: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Human-readable stable ID for the command line and serialization.
    /// Default: `""` (unassigned).
    pub string_id: &'static str,

    /// Normalization curve. Default: [`ParamScale::Linear`].
    pub scale: ParamScale,
}

impl ParamDescriptor {
    /// Dimensionless control over \[0.0, 1.0\].
    ///
    /// Used for amounts and blends (drive, mix).
    pub fn unit_interval(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Frequency parameter in Hz with logarithmic scaling.
    ///
    /// # Arguments
    ///
    /// * `name` - Full parameter name (e.g., "Lowpass")
    /// * `short_name` - Short name for narrow displays (e.g., "LP")
    /// * `min` - Minimum frequency in Hz (must be > 0)
    /// * `max` - Maximum frequency in Hz
    /// * `default` - Default frequency in Hz
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
        }
    }

    /// Gain parameter with custom name and range (decibels).
    ///
    /// # Arguments
    ///
    /// * `name` - Full parameter name (e.g., "Output")
    /// * `short_name` - Short name for narrow displays (e.g., "Out")
    /// * `min` - Minimum gain in dB
    /// * `max` - Maximum gain in dB
    /// * `default` - Default gain in dB
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// Builder pattern - call after a factory method or struct literal.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN maps to the default so a corrupt write can never escape the range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use greendist_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Output", "Out", -24.0, 24.0, 0.0);
    /// assert_eq!(desc.clamp(0.0), 0.0);
    /// assert_eq!(desc.clamp(-100.0), -24.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// Respects the parameter's [`ParamScale`].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize). The input is clamped to
    /// \[0.0, 1.0\] first.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - for gain and level parameters.
    Decibels,

    /// Hertz (Hz) - for filter cutoff frequencies.
    Hertz,

    /// No unit - for dimensionless parameters.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use greendist_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}
