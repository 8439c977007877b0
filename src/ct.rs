//! Constant-time comparison and conditional move for the decapsulation
//! path, built on the `subtle` crate.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time byte-slice equality. Slices must be the same length
/// (lengths here are public parameters, never secrets).
#[inline]
pub fn verify(a: &[u8], b: &[u8]) -> Choice {
    debug_assert_eq!(a.len(), b.len(), "ct::verify: length mismatch");
    a.ct_eq(b)
}

/// Constant-time conditional overwrite: `dst ← src` iff `choice` is set.
#[inline]
pub fn cmov(dst: &mut [u8], src: &[u8], choice: Choice) {
    debug_assert_eq!(dst.len(), src.len(), "ct::cmov: length mismatch");
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(&s, choice);
    }
}
