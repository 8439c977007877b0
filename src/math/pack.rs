//! Byte-level packing, unpacking, compression, and decompression.
//!
//! All functions operate on raw coefficient arrays (`[u16; N]`) and byte
//! buffers, keeping this module independent of the `Poly` wrapper. Every
//! packer freezes coefficients first, so callers may pass unreduced values.
//!
//! Three codecs exist:
//! - 13 bits per coefficient (lossless serialisation, 416 bytes),
//! - 11 bits per coefficient (vector compression, 352 bytes),
//! - 3 bits per coefficient (scalar compression, 96 bytes).
//!
//! The compressed codecs round to nearest and are deliberately lossy;
//! the round-trip error is the scheme's error-correction budget.

use super::reduce::freeze;
use crate::params::{
    N, POLYVEC_ELEM_COMPRESSED_BYTES, POLY_BYTES, POLY_COMPRESSED_BYTES, Q, SYMBYTES,
};

// ---------------------------------------------------------------------------
// 13-bit serialisation (POLY_BYTES = 416)
// ---------------------------------------------------------------------------

/// Serialize coefficients to bytes: 8 coefficients → 13 bytes, little-endian.
pub fn poly_tobytes(r: &mut [u8], a: &[u16; N]) {
    debug_assert!(r.len() >= POLY_BYTES);
    for i in 0..N / 8 {
        let t: [u16; 8] = core::array::from_fn(|j| freeze(a[8 * i + j]));
        r[13 * i] = t[0] as u8;
        r[13 * i + 1] = ((t[0] >> 8) | (t[1] << 5)) as u8;
        r[13 * i + 2] = (t[1] >> 3) as u8;
        r[13 * i + 3] = ((t[1] >> 11) | (t[2] << 2)) as u8;
        r[13 * i + 4] = ((t[2] >> 6) | (t[3] << 7)) as u8;
        r[13 * i + 5] = (t[3] >> 1) as u8;
        r[13 * i + 6] = ((t[3] >> 9) | (t[4] << 4)) as u8;
        r[13 * i + 7] = (t[4] >> 4) as u8;
        r[13 * i + 8] = ((t[4] >> 12) | (t[5] << 1)) as u8;
        r[13 * i + 9] = ((t[5] >> 7) | (t[6] << 6)) as u8;
        r[13 * i + 10] = (t[6] >> 2) as u8;
        r[13 * i + 11] = ((t[6] >> 10) | (t[7] << 3)) as u8;
        r[13 * i + 12] = (t[7] >> 5) as u8;
    }
}

/// Deserialize bytes to coefficients; inverse of [`poly_tobytes`].
pub fn poly_frombytes(r: &mut [u16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLY_BYTES);
    for i in 0..N / 8 {
        let b = &a[13 * i..13 * i + 13];
        r[8 * i] = b[0] as u16 | (((b[1] & 0x1f) as u16) << 8);
        r[8 * i + 1] = (b[1] >> 5) as u16 | ((b[2] as u16) << 3) | (((b[3] & 0x03) as u16) << 11);
        r[8 * i + 2] = (b[3] >> 2) as u16 | (((b[4] & 0x7f) as u16) << 6);
        r[8 * i + 3] = (b[4] >> 7) as u16 | ((b[5] as u16) << 1) | (((b[6] & 0x0f) as u16) << 9);
        r[8 * i + 4] = (b[6] >> 4) as u16 | ((b[7] as u16) << 4) | (((b[8] & 0x01) as u16) << 12);
        r[8 * i + 5] = (b[8] >> 1) as u16 | (((b[9] & 0x3f) as u16) << 7);
        r[8 * i + 6] = (b[9] >> 6) as u16 | ((b[10] as u16) << 2) | (((b[11] & 0x07) as u16) << 10);
        r[8 * i + 7] = (b[11] >> 3) as u16 | ((b[12] as u16) << 5);
    }
}

// ---------------------------------------------------------------------------
// 3-bit compression (POLY_COMPRESSED_BYTES = 96, ciphertext v component)
// ---------------------------------------------------------------------------

/// Compress to 3 bits per coefficient: 8 coefficients → 3 bytes.
pub fn poly_compress_d3(r: &mut [u8], a: &[u16; N]) {
    debug_assert!(r.len() >= POLY_COMPRESSED_BYTES);
    for i in 0..N / 8 {
        let t: [u32; 8] = core::array::from_fn(|j| {
            ((((freeze(a[8 * i + j]) as u32) << 3) + Q as u32 / 2) / Q as u32) & 7
        });
        r[3 * i] = (t[0] | (t[1] << 3) | (t[2] << 6)) as u8;
        r[3 * i + 1] = ((t[2] >> 2) | (t[3] << 1) | (t[4] << 4) | (t[5] << 7)) as u8;
        r[3 * i + 2] = ((t[5] >> 1) | (t[6] << 2) | (t[7] << 5)) as u8;
    }
}

/// Decompress 3-bit values; approximate inverse of [`poly_compress_d3`].
pub fn poly_decompress_d3(r: &mut [u16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLY_COMPRESSED_BYTES);
    for i in 0..N / 8 {
        let b = &a[3 * i..3 * i + 3];
        let t: [u16; 8] = [
            (b[0] & 7) as u16,
            ((b[0] >> 3) & 7) as u16,
            ((b[0] >> 6) | ((b[1] << 2) & 4)) as u16,
            ((b[1] >> 1) & 7) as u16,
            ((b[1] >> 4) & 7) as u16,
            ((b[1] >> 7) | ((b[2] << 1) & 6)) as u16,
            ((b[2] >> 2) & 7) as u16,
            (b[2] >> 5) as u16,
        ];
        for (j, &v) in t.iter().enumerate() {
            r[8 * i + j] = ((v * Q) + 4) >> 3;
        }
    }
}

// ---------------------------------------------------------------------------
// 11-bit compression (352 bytes per polynomial, public key and ciphertext b)
// ---------------------------------------------------------------------------

/// Compress to 11 bits per coefficient: 8 coefficients → 11 bytes.
pub fn poly_compress_d11(r: &mut [u8], a: &[u16; N]) {
    debug_assert!(r.len() >= POLYVEC_ELEM_COMPRESSED_BYTES);
    for j in 0..N / 8 {
        let t: [u32; 8] = core::array::from_fn(|k| {
            ((((freeze(a[8 * j + k]) as u32) << 11) + Q as u32 / 2) / Q as u32) & 0x7ff
        });
        r[11 * j] = t[0] as u8;
        r[11 * j + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
        r[11 * j + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
        r[11 * j + 3] = (t[2] >> 2) as u8;
        r[11 * j + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
        r[11 * j + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
        r[11 * j + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
        r[11 * j + 7] = (t[5] >> 1) as u8;
        r[11 * j + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
        r[11 * j + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
        r[11 * j + 10] = (t[7] >> 3) as u8;
    }
}

/// Decompress 11-bit values; approximate inverse of [`poly_compress_d11`].
pub fn poly_decompress_d11(r: &mut [u16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYVEC_ELEM_COMPRESSED_BYTES);
    for j in 0..N / 8 {
        let b = &a[11 * j..11 * j + 11];
        let t: [u32; 8] = [
            b[0] as u32 | (((b[1] & 0x07) as u32) << 8),
            ((b[1] >> 3) as u32) | (((b[2] & 0x3f) as u32) << 5),
            ((b[2] >> 6) as u32) | ((b[3] as u32) << 2) | (((b[4] & 0x01) as u32) << 10),
            ((b[4] >> 1) as u32) | (((b[5] & 0x0f) as u32) << 7),
            ((b[5] >> 4) as u32) | (((b[6] & 0x7f) as u32) << 4),
            ((b[6] >> 7) as u32) | ((b[7] as u32) << 1) | (((b[8] & 0x03) as u32) << 9),
            ((b[8] >> 2) as u32) | (((b[9] & 0x1f) as u32) << 6),
            ((b[9] >> 5) as u32) | ((b[10] as u32) << 3),
        ];
        for (k, &v) in t.iter().enumerate() {
            r[8 * j + k] = (((v * Q as u32) + 1024) >> 11) as u16;
        }
    }
}

// ---------------------------------------------------------------------------
// Message encoding (1 bit per coefficient)
// ---------------------------------------------------------------------------

/// Decode a 32-byte message into polynomial coefficients.
///
/// Each 1 bit maps to `⌈q/2⌉ = 3841`, each 0 bit to 0, via a mask rather
/// than a branch.
pub fn poly_frommsg(r: &mut [u16; N], msg: &[u8; SYMBYTES]) {
    for (i, &v) in msg.iter().enumerate() {
        for j in 0..8 {
            let mask = (((v as u16) >> j) & 1).wrapping_neg();
            r[8 * i + j] = mask & ((Q + 1) / 2);
        }
    }
}

/// Encode a polynomial as a 32-byte message using the nearest-bit decoder
/// `((2c + q/2)/q) mod 2`. Branch-free.
pub fn poly_tomsg(msg: &mut [u8; SYMBYTES], a: &[u16; N]) {
    for (i, out) in msg.iter_mut().enumerate() {
        *out = 0;
        for j in 0..8 {
            let t = (((freeze(a[8 * i + j]) << 1) + Q / 2) / Q) & 1;
            *out |= (t as u8) << j;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut a = [0u16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = ((i as u32 * 4099) % Q as u32) as u16;
        }
        let mut buf = [0u8; POLY_BYTES];
        poly_tobytes(&mut buf, &a);

        let mut b = [0u16; N];
        poly_frombytes(&mut b, &buf);
        assert_eq!(a, b);
    }

    #[test]
    fn tobytes_freezes_unreduced_input() {
        let mut a = [0u16; N];
        let mut reduced = [0u16; N];
        for i in 0..N {
            a[i] = ((i as u32 * 97) % (2 * Q as u32)) as u16;
            reduced[i] = a[i] % Q;
        }
        let mut buf = [0u8; POLY_BYTES];
        poly_tobytes(&mut buf, &a);
        let mut b = [0u16; N];
        poly_frombytes(&mut b, &buf);
        assert_eq!(b, reduced);
    }

    #[test]
    fn compress_d3_idempotent_on_range() {
        // compress ∘ decompress is the identity on valid compressed words.
        for v in 0u16..8 {
            let decompressed = ((v * Q) + 4) >> 3;
            let recompressed =
                ((((decompressed as u32) << 3) + Q as u32 / 2) / Q as u32) & 7;
            assert_eq!(recompressed as u16, v, "3-bit value {v} not a fixed point");
        }
    }

    #[test]
    fn compress_d11_idempotent_on_range() {
        for v in 0u32..2048 {
            let decompressed = ((v * Q as u32) + 1024) >> 11;
            let recompressed = (((decompressed << 11) + Q as u32 / 2) / Q as u32) & 0x7ff;
            assert_eq!(recompressed, v, "11-bit value {v} not a fixed point");
        }
    }

    #[test]
    fn decompress_compress_is_lossy() {
        let mut a = [0u16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = ((i as u32 * 53 + 1) % Q as u32) as u16;
        }
        let mut buf = [0u8; POLY_COMPRESSED_BYTES];
        poly_compress_d3(&mut buf, &a);
        let mut b = [0u16; N];
        poly_decompress_d3(&mut b, &buf);
        assert_ne!(a, b, "3-bit compression must lose information");

        // The error stays within the quantisation step.
        for i in 0..N {
            let diff = (a[i] as i32 - b[i] as i32).rem_euclid(Q as i32);
            let diff = diff.min(Q as i32 - diff);
            assert!(diff <= (Q as i32 + 8) / 16, "excess error at {i}: {diff}");
        }
    }

    #[test]
    fn decompress_d11_error_bounded() {
        let mut a = [0u16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = ((i as u32 * 31 + 7) % Q as u32) as u16;
        }
        let mut buf = [0u8; POLYVEC_ELEM_COMPRESSED_BYTES];
        poly_compress_d11(&mut buf, &a);
        let mut b = [0u16; N];
        poly_decompress_d11(&mut b, &buf);
        for i in 0..N {
            let diff = (a[i] as i32 - b[i] as i32).rem_euclid(Q as i32);
            let diff = diff.min(Q as i32 - diff);
            assert!(diff <= 2, "excess error at {i}: {diff}");
        }
    }

    #[test]
    fn frommsg_tomsg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i as u8).wrapping_mul(37));
        let mut p = [0u16; N];
        poly_frommsg(&mut p, &msg);
        // 1 bits land on ⌈q/2⌉, 0 bits on 0.
        assert!(p.iter().all(|&c| c == 0 || c == (Q + 1) / 2));

        let mut recovered = [0u8; SYMBYTES];
        poly_tomsg(&mut recovered, &p);
        assert_eq!(msg, recovered);
    }
}
