//! Dry/wet blend.

use greendist_core::wet_dry_mix;

/// Blend `wet` toward `dry` in place: `wet = dry * (1 - mix) + wet * mix`.
///
/// `mix = 0` restores the dry signal exactly and `mix = 1` leaves the wet
/// signal untouched. Only the overlapping length of the two slices is
/// written.
#[inline]
pub fn mix_block(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());
    for (w, &d) in wet.iter_mut().zip(dry) {
        *w = wet_dry_mix(d, *w, mix);
    }
}
