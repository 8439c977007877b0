//! Polynomial type and coefficient-level operations.
//!
//! `Poly` wraps `[u16; N]` (N = 256) and provides arithmetic, NTT
//! transforms, compression, serialisation, message encoding, and noise
//! sampling. Whether a value is in normal order or bit-reversed NTT order
//! is a static property of each use site; it is never tagged at runtime.
//!
//! Coefficients stay in `[0, 2q)` across chained arithmetic and reach the
//! canonical `[0, q)` range only through `freeze` inside the packers.

use super::pack;
use crate::params::{N, Q, SYMBYTES};
use crate::{accel, hash};

/// An element of `R_q = Z_q[X]/(X^256 + 1)`: `coeffs[0] + coeffs[1]·X +
/// … + coeffs[255]·X²⁵⁵`.
#[derive(Clone, Copy)]
pub struct Poly {
    pub(crate) coeffs: [u16; N],
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Poly { coeffs: [0u16; N] }
    }

    // ---- Arithmetic -------------------------------------------------------

    /// Coefficient-wise addition, Barrett-reduced: `self = self + other`.
    #[inline]
    pub fn add(&mut self, other: &Poly) {
        for (c, &o) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *c = super::reduce::barrett_reduce(*c + o);
        }
    }

    /// Coefficient-wise subtraction, Barrett-reduced: `self = self − other`.
    ///
    /// Adds 3q before subtracting to keep the operand non-negative.
    #[inline]
    pub fn sub(&mut self, other: &Poly) {
        for (c, &o) in self.coeffs.iter_mut().zip(other.coeffs.iter()) {
            *c = super::reduce::barrett_reduce(*c + 3 * Q - o);
        }
    }

    // ---- NTT / inverse NTT ------------------------------------------------

    /// Forward NTT (in-place): normal order → bit-reversed order.
    #[inline]
    pub fn ntt(&mut self) {
        accel::ntt(&mut self.coeffs);
    }

    /// Inverse NTT (in-place): bit-reversed order → normal order.
    #[inline]
    pub fn invntt(&mut self) {
        accel::invntt(&mut self.coeffs);
    }

    // ---- Serialisation ----------------------------------------------------

    /// Serialize to 416 bytes (13 bits per frozen coefficient).
    pub fn tobytes(&self, r: &mut [u8]) {
        pack::poly_tobytes(r, &self.coeffs);
    }

    /// Deserialize from 416 bytes.
    pub fn frombytes(a: &[u8]) -> Self {
        let mut p = Poly::zero();
        pack::poly_frombytes(&mut p.coeffs, a);
        p
    }

    /// Compress to 96 bytes (3 bits per coefficient, lossy).
    pub fn compress(&self, r: &mut [u8]) {
        pack::poly_compress_d3(r, &self.coeffs);
    }

    /// Decompress from 96 bytes; approximate inverse of [`Poly::compress`].
    pub fn decompress(a: &[u8]) -> Self {
        let mut p = Poly::zero();
        pack::poly_decompress_d3(&mut p.coeffs, a);
        p
    }

    // ---- Message encoding -------------------------------------------------

    /// Decode a 32-byte message: each 1 bit becomes `⌈q/2⌉`.
    pub fn frommsg(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Poly::zero();
        pack::poly_frommsg(&mut p.coeffs, msg);
        p
    }

    /// Encode as a 32-byte message via the nearest-bit decoder.
    pub fn tomsg(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        pack::poly_tomsg(&mut msg, &self.coeffs);
        msg
    }

    // ---- Noise sampling ---------------------------------------------------

    /// Sample a noise polynomial from `SHAKE-256(seed ‖ nonce)` with the
    /// centered binomial distribution CBD(η).
    pub fn getnoise(seed: &[u8; SYMBYTES], nonce: u8, eta: usize) -> Self {
        let mut buf = [0u8; 5 * N / 4];
        let len = eta * N / 4;
        hash::prf(seed, nonce, &mut buf[..len]);

        let mut p = Poly::zero();
        accel::cbd(&mut p.coeffs, &buf[..len], eta);
        p
    }
}

impl Default for Poly {
    #[inline]
    fn default() -> Self {
        Poly::zero()
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly")
            .field("coeffs[..4]", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}
