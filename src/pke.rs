//! IND-CPA public-key encryption — the inner scheme the KEM's
//! Fujisaki–Okamoto transform is built on.
//!
//! Not exposed directly; called by [`crate::kem`]. All functions operate
//! on the packed byte encodings so the KEM can re-encrypt during
//! decapsulation without round-tripping through key objects.

use rand_core::CryptoRng;

use crate::hash;
use crate::math::poly::Poly;
use crate::math::polyvec::PolyVec;
use crate::math::sample;
use crate::params::{ParameterSet, SYMBYTES};

// ---------------------------------------------------------------------------
// Matrix generation
// ---------------------------------------------------------------------------

/// Sample the k×k public matrix A from the public seed using SHAKE-128
/// rejection sampling, one fresh sponge per cell.
///
/// If `transposed`, the indices absorbed after the seed are swapped, which
/// yields Aᵀ for encryption.
fn gen_matrix<const K: usize>(a: &mut [PolyVec<K>], seed: &[u8; SYMBYTES], transposed: bool) {
    for (i, row) in a.iter_mut().enumerate() {
        for (j, poly) in row.polys.iter_mut().enumerate() {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::xof_absorb(seed, x, y);
            sample::rej_uniform(&mut poly.coeffs, &mut xof);
        }
    }
}

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Generate an IND-CPA key pair.
///
/// Draws 32 bytes `d` from the RNG, expands `(publicSeed ‖ noiseSeed) =
/// SHA3-512(d)`, and writes the packed public key (compressed `t` plus the
/// public seed) and secret key (NTT-domain `s`).
pub(crate) fn indcpa_keypair<P: ParameterSet>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    rng: &mut impl CryptoRng,
) {
    match P::K {
        2 => indcpa_keypair_inner::<P, 2>(pk_bytes, sk_bytes, rng),
        3 => indcpa_keypair_inner::<P, 3>(pk_bytes, sk_bytes, rng),
        4 => indcpa_keypair_inner::<P, 4>(pk_bytes, sk_bytes, rng),
        _ => unreachable!(),
    }
}

fn indcpa_keypair_inner<P: ParameterSet, const K: usize>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    rng: &mut impl CryptoRng,
) {
    let mut d = [0u8; SYMBYTES];
    rng.fill_bytes(&mut d);

    let g = hash::hash_g(&d);
    let public_seed: [u8; SYMBYTES] = g[..SYMBYTES].try_into().unwrap();
    let noise_seed: [u8; SYMBYTES] = g[SYMBYTES..].try_into().unwrap();

    let mut a: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut a, &public_seed, false);

    // Secret vector first, then the error vector; a single byte nonce
    // counts CBD draws across both.
    let mut nonce = 0u8;
    let mut skpv = PolyVec::<K>::zero();
    for p in skpv.polys.iter_mut() {
        *p = Poly::getnoise(&noise_seed, nonce, P::ETA);
        nonce += 1;
    }

    skpv.ntt();

    let mut e = PolyVec::<K>::zero();
    for p in e.polys.iter_mut() {
        *p = Poly::getnoise(&noise_seed, nonce, P::ETA);
        nonce += 1;
    }

    // t = invNTT(A·ŝ) + e
    let mut pkpv = PolyVec::<K>::zero();
    for i in 0..K {
        PolyVec::pointwise_acc(&mut pkpv.polys[i], &skpv, &a[i]);
    }
    pkpv.invntt();
    pkpv.add(&e);

    skpv.tobytes(&mut sk_bytes[..P::INDCPA_SK_BYTES]);
    pkpv.compress(&mut pk_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    pk_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_PK_BYTES].copy_from_slice(&public_seed);
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

/// Deterministic IND-CPA encryption of the 256-bit message `m` under the
/// packed public key, with all noise derived from `coins`.
pub(crate) fn indcpa_encrypt<P: ParameterSet>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_encrypt_inner::<P, 2>(ct_bytes, m, pk_bytes, coins),
        3 => indcpa_encrypt_inner::<P, 3>(ct_bytes, m, pk_bytes, coins),
        4 => indcpa_encrypt_inner::<P, 4>(ct_bytes, m, pk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_encrypt_inner<P: ParameterSet, const K: usize>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let mut pkpv = PolyVec::<K>::decompress(&pk_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    let seed: [u8; SYMBYTES] = pk_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_PK_BYTES]
        .try_into()
        .unwrap();

    let k = Poly::frommsg(m);

    pkpv.ntt();

    let mut at: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut at, &seed, true);

    // r first, then e₁, then the single e₂ polynomial.
    let mut nonce = 0u8;
    let mut sp = PolyVec::<K>::zero();
    for p in sp.polys.iter_mut() {
        *p = Poly::getnoise(coins, nonce, P::ETA);
        nonce += 1;
    }

    sp.ntt();

    let mut ep = PolyVec::<K>::zero();
    for p in ep.polys.iter_mut() {
        *p = Poly::getnoise(coins, nonce, P::ETA);
        nonce += 1;
    }

    // b = invNTT(Aᵀ·r̂) + e₁
    let mut bp = PolyVec::<K>::zero();
    for i in 0..K {
        PolyVec::pointwise_acc(&mut bp.polys[i], &sp, &at[i]);
    }
    bp.invntt();
    bp.add(&ep);

    // v = invNTT(t̂·r̂) + e₂ + Decode(m)
    let mut v = Poly::zero();
    PolyVec::pointwise_acc(&mut v, &pkpv, &sp);
    v.invntt();

    let epp = Poly::getnoise(coins, nonce, P::ETA);
    v.add(&epp);
    v.add(&k);

    bp.compress(&mut ct_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    v.compress(&mut ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES]);
}

// ---------------------------------------------------------------------------
// Decryption
// ---------------------------------------------------------------------------

/// IND-CPA decryption: recovers the message from a packed ciphertext and
/// secret key.
pub(crate) fn indcpa_decrypt<P: ParameterSet>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    match P::K {
        2 => indcpa_decrypt_inner::<P, 2>(m, ct_bytes, sk_bytes),
        3 => indcpa_decrypt_inner::<P, 3>(m, ct_bytes, sk_bytes),
        4 => indcpa_decrypt_inner::<P, 4>(m, ct_bytes, sk_bytes),
        _ => unreachable!(),
    }
}

fn indcpa_decrypt_inner<P: ParameterSet, const K: usize>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    let mut bp = PolyVec::<K>::decompress(&ct_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    let v = Poly::decompress(&ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::CT_BYTES]);
    let skpv = PolyVec::<K>::frombytes(&sk_bytes[..P::INDCPA_SK_BYTES]);

    bp.ntt();

    // m' = invNTT(ŝ·b̂) − v
    let mut mp = Poly::zero();
    PolyVec::pointwise_acc(&mut mp, &skpv, &bp);
    mp.invntt();
    mp.sub(&v);

    *m = mp.tomsg();
}
