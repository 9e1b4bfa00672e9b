//! The five controls of the distortion and their lock-free store.
//!
//! [`Param`] names each control and owns its [`ParamDescriptor`].
//! [`ParamStore`] keeps the current values as atomic `u32` (f32 bit-cast)
//! so a UI or automation thread can write while the audio thread reads,
//! without a lock on the real-time path.
//!
//! Parameters are independent scalars: a block may observe a new drive and
//! an old mix. No cross-parameter consistency is required.
//!
//! | Id | Name | Range | Default |
//! |----|------|-------|---------|
//! | `drive` | Drive | 0.0–1.0 | 0.5 |
//! | `tone` | Lowpass | 20–20000 Hz | 20000 |
//! | `highpass` | Highpass | 20–20000 Hz | 20 |
//! | `mix` | Mix | 0.0–1.0 | 1.0 |
//! | `output` | Output | −24–24 dB | 0.0 |

use core::sync::atomic::{AtomicU32, Ordering};
use greendist_core::{ParamDescriptor, ParamId};

/// Identifies one of the processor's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    /// Waveshaper drive amount, 0.0–1.0.
    Drive,
    /// Lowpass ("tone") cutoff in Hz.
    Tone,
    /// Highpass cutoff in Hz.
    Highpass,
    /// Dry/wet blend, 0.0 (dry) to 1.0 (wet).
    Mix,
    /// Output trim in dB.
    Output,
}

impl Param {
    /// Number of parameters.
    pub const COUNT: usize = 5;

    /// All parameters in index order.
    pub const ALL: [Param; Self::COUNT] = [
        Param::Drive,
        Param::Tone,
        Param::Highpass,
        Param::Mix,
        Param::Output,
    ];

    /// Zero-based index, stable for the lifetime of the crate.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable string identifier (`"drive"`, `"tone"`, ...).
    pub fn id(self) -> &'static str {
        self.descriptor().string_id
    }

    /// Range, default, unit and scaling for this control.
    pub fn descriptor(self) -> ParamDescriptor {
        match self {
            Param::Drive => ParamDescriptor::unit_interval("Drive", "Drive", 0.5)
                .with_id(ParamId(100), "drive"),
            Param::Tone => ParamDescriptor::frequency_hz("Lowpass", "LP", 20.0, 20000.0, 20000.0)
                .with_id(ParamId(101), "tone"),
            Param::Highpass => {
                ParamDescriptor::frequency_hz("Highpass", "HP", 20.0, 20000.0, 20.0)
                    .with_id(ParamId(102), "highpass")
            }
            Param::Mix => {
                ParamDescriptor::unit_interval("Mix", "Mix", 1.0).with_id(ParamId(103), "mix")
            }
            Param::Output => ParamDescriptor::gain_db("Output", "Out", -24.0, 24.0, 0.0)
                .with_id(ParamId(104), "output"),
        }
    }

    /// Finds a parameter by string id, display name or short name
    /// (case-insensitive).
    ///
    /// ```rust
    /// use greendist_effects::Param;
    ///
    /// assert_eq!(Param::from_id("tone"), Some(Param::Tone));
    /// assert_eq!(Param::from_id("Lowpass"), Some(Param::Tone));
    /// assert_eq!(Param::from_id("hp"), Some(Param::Highpass));
    /// assert_eq!(Param::from_id("feedback"), None);
    /// ```
    pub fn from_id(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let desc = p.descriptor();
            desc.string_id.eq_ignore_ascii_case(name)
                || desc.name.eq_ignore_ascii_case(name)
                || desc.short_name.eq_ignore_ascii_case(name)
        })
    }
}

/// Read-only access to current parameter values.
///
/// The pipeline only ever reads through this trait. Implementations must be
/// non-blocking and free of side effects.
pub trait ParamSource {
    /// Current plain (denormalized) value of `param`.
    fn value(&self, param: Param) -> f32;
}

/// Lock-free parameter store shared between a control thread and the audio
/// thread.
///
/// Every write is clamped into the descriptor range, so readers never see an
/// out-of-range value.
///
/// # Example
///
/// ```rust
/// use greendist_effects::{Param, ParamSource, ParamStore};
///
/// let store = ParamStore::new();
/// store.set(Param::Output, 40.0);
/// assert_eq!(store.value(Param::Output), 24.0);
/// ```
#[derive(Debug)]
pub struct ParamStore {
    values: [AtomicU32; Param::COUNT],
}

impl ParamStore {
    /// Create a store with every parameter at its default.
    pub fn new() -> Self {
        Self {
            values: Param::ALL.map(|p| AtomicU32::new(p.descriptor().default.to_bits())),
        }
    }

    /// Read the current value of a parameter (lock-free).
    #[inline]
    pub fn get(&self, param: Param) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Acquire))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds.
    pub fn set(&self, param: Param, value: f32) {
        let clamped = param.descriptor().clamp(value);
        self.values[param.index()].store(clamped.to_bits(), Ordering::Release);
    }

    /// Write a parameter from normalized \[0.0, 1.0\] host space.
    pub fn set_normalized(&self, param: Param, normalized: f32) {
        self.set(param, param.descriptor().denormalize(normalized));
    }

    /// Read a parameter in normalized \[0.0, 1.0\] host space.
    pub fn get_normalized(&self, param: Param) -> f32 {
        param.descriptor().normalize(self.get(param))
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for param in Param::ALL {
            self.set(param, param.descriptor().default);
        }
    }

    /// Plain copy of all current values, in [`Param::ALL`] order.
    pub fn values(&self) -> [f32; Param::COUNT] {
        Param::ALL.map(|p| self.get(p))
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamSource for ParamStore {
    #[inline]
    fn value(&self, param: Param) -> f32 {
        self.get(param)
    }
}
