//! SHA-3 family adapters.
//!
//! The scheme consumes the sponges as black boxes:
//!
//! | Role                   | Primitive | Function |
//! |------------------------|-----------|----------|
//! | H (keys, ciphertexts)  | SHA3-256  | [`hash_h`] |
//! | G (seed expansion)     | SHA3-512  | [`hash_g`] |
//! | PRF (noise)            | SHAKE-256 | [`prf`] |
//! | XOF (matrix)           | SHAKE-128 | [`xof_absorb`] |
//! | KDF (key exchange)     | SHAKE-256 | [`kdf`] |

use crate::params::SYMBYTES;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// H(input) = SHA3-256(input) → 32 bytes.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; SYMBYTES] {
    let mut h = Sha3_256::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// G(input) = SHA3-512(input) → 64 bytes.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 2 * SYMBYTES] {
    let mut h = Sha3_512::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// PRF(seed, nonce) = SHAKE-256(seed ‖ nonce), squeezed to fill `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[nonce]);
    h.finalize_xof().read(output);
}

/// SHAKE-128 absorber for matrix sampling.
///
/// Absorbs `seed ‖ x ‖ y` and returns a reader from which uniform bytes
/// are squeezed; the caller resets state simply by absorbing afresh per
/// matrix cell.
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut h = Shake128::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[x, y]);
    h.finalize_xof()
}

/// KDF(parts…) = SHAKE-256(parts₀ ‖ parts₁ ‖ …) → 32 bytes.
///
/// The key-exchange final derivation; input ordering is fixed by the
/// protocols.
pub fn kdf(parts: &[&[u8]]) -> [u8; SYMBYTES] {
    let mut h = Shake256::default();
    for part in parts {
        Update::update(&mut h, part);
    }
    let mut out = [0u8; SYMBYTES];
    h.finalize_xof().read(&mut out);
    out
}
