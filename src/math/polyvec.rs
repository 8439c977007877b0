//! Vector of polynomials and associated operations.
//!
//! `PolyVec<K>` holds `K` polynomials (K = 2, 3, or 4) and provides NTT,
//! the accumulated pointwise inner product, compression, and byte
//! serialisation, parameterised by the const-generic module rank.

use super::poly::Poly;
use super::reduce::{barrett_reduce, montgomery_reduce};
use crate::accel;
use crate::params::{N, POLYVEC_ELEM_COMPRESSED_BYTES, POLY_BYTES};

/// A vector of `K` ring elements.
#[derive(Clone)]
pub struct PolyVec<const K: usize> {
    pub(crate) polys: [Poly; K],
}

impl<const K: usize> PolyVec<K> {
    /// Zero-initialised polynomial vector.
    #[inline]
    pub fn zero() -> Self {
        PolyVec {
            polys: [Poly::zero(); K],
        }
    }

    // ---- NTT / inverse NTT ------------------------------------------------

    /// Forward NTT on every element.
    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Inverse NTT on every element.
    pub fn invntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt();
        }
    }

    // ---- Arithmetic -------------------------------------------------------

    /// Element-wise addition: `self = self + other`.
    pub fn add(&mut self, other: &PolyVec<K>) {
        for (p, o) in self.polys.iter_mut().zip(other.polys.iter()) {
            p.add(o);
        }
    }

    /// Accumulated pointwise product in the NTT domain:
    /// `r = Σᵢ a[i] · b[i]`.
    pub fn pointwise_acc(r: &mut Poly, a: &PolyVec<K>, b: &PolyVec<K>) {
        accel::pointwise_acc(&mut r.coeffs, &a.polys, &b.polys);
    }

    // ---- Serialisation ----------------------------------------------------

    /// Serialize to `K × 416` bytes.
    pub fn tobytes(&self, r: &mut [u8]) {
        for (i, p) in self.polys.iter().enumerate() {
            p.tobytes(&mut r[i * POLY_BYTES..(i + 1) * POLY_BYTES]);
        }
    }

    /// Deserialize from `K × 416` bytes.
    pub fn frombytes(a: &[u8]) -> Self {
        let mut v = PolyVec::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            *p = Poly::frombytes(&a[i * POLY_BYTES..(i + 1) * POLY_BYTES]);
        }
        v
    }

    /// Compress to `K × 352` bytes (11 bits per coefficient, lossy).
    pub fn compress(&self, r: &mut [u8]) {
        for (i, p) in self.polys.iter().enumerate() {
            super::pack::poly_compress_d11(
                &mut r[i * POLYVEC_ELEM_COMPRESSED_BYTES..(i + 1) * POLYVEC_ELEM_COMPRESSED_BYTES],
                &p.coeffs,
            );
        }
    }

    /// Decompress from `K × 352` bytes.
    pub fn decompress(a: &[u8]) -> Self {
        let mut v = PolyVec::zero();
        for (i, p) in v.polys.iter_mut().enumerate() {
            super::pack::poly_decompress_d11(
                &mut p.coeffs,
                &a[i * POLYVEC_ELEM_COMPRESSED_BYTES..(i + 1) * POLYVEC_ELEM_COMPRESSED_BYTES],
            );
        }
        v
    }
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Reference pointwise multiply-accumulate.
///
/// Each product uses the Montgomery trick `t = mont(4613·b)` then
/// `mont(a·t)`, where 4613 = R² mod q cancels the two R⁻¹ factors. The
/// k ≤ 4 accumulated terms stay below 8q before the final Barrett
/// reduction.
pub(crate) fn pointwise_acc_ref(r: &mut [u16; N], a: &[Poly], b: &[Poly]) {
    const R2_MOD_Q: u32 = 4613;
    for j in 0..N {
        let t = montgomery_reduce(R2_MOD_Q * b[0].coeffs[j] as u32);
        let mut acc = montgomery_reduce(a[0].coeffs[j] as u32 * t as u32);
        for i in 1..a.len() {
            let t = montgomery_reduce(R2_MOD_Q * b[i].coeffs[j] as u32);
            acc += montgomery_reduce(a[i].coeffs[j] as u32 * t as u32);
        }
        r[j] = barrett_reduce(acc);
    }
}
