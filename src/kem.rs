//! IND-CCA2 key encapsulation via the Fujisaki–Okamoto transform:
//! key generation, encapsulation, and decapsulation with implicit
//! rejection.

use rand_core::CryptoRng;
use thiserror::Error;

use crate::params::{ByteArray, ParameterSet, SYMBYTES};
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
use crate::{ct, hash, pke};

/// Errors returned by key deserialisation.
///
/// Decapsulation failure is deliberately absent: a tampered ciphertext
/// yields a pseudorandom shared secret (implicit rejection), never an
/// error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KemError {
    /// A serialised key has the wrong length.
    #[error("kyber: invalid key size")]
    InvalidKeySize,
    /// A serialised secret key's embedded digest does not match its
    /// embedded public key.
    #[error("kyber: invalid private key")]
    InvalidPrivateKey,
}

/// Generate a key pair.
///
/// Draws 32 bytes for the IND-CPA keys, then 32 bytes for the rejection
/// secret z; the secret key stores `indcpa_sk ‖ pk ‖ H(pk) ‖ z`.
pub fn keypair<P: ParameterSet>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut pk_arr = P::PkArray::zeroed();
    let mut sk_arr = P::SkArray::zeroed();

    {
        let pk = pk_arr.as_mut();
        let sk = sk_arr.as_mut();

        pke::indcpa_keypair::<P>(pk, &mut sk[..P::INDCPA_SK_BYTES], rng);

        let (head, z) = sk.split_at_mut(P::SK_BYTES - SYMBYTES);
        head[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES].copy_from_slice(pk);
        let h_pk = hash::hash_h(pk);
        head[P::SK_BYTES - 2 * SYMBYTES..].copy_from_slice(&h_pk);
        rng.fill_bytes(z);
    }

    (
        PublicKey::from_array(pk_arr),
        SecretKey::from_array(sk_arr),
    )
}

/// Encapsulate a fresh 32-byte shared secret to `pk`.
///
/// The 32-byte RNG draw is hashed before use so raw system randomness
/// never leaks into the ciphertext, and H(pk) is mixed into the coin
/// derivation as a multi-target countermeasure.
pub fn encapsulate<P: ParameterSet>(
    pk: &PublicKey<P>,
    rng: &mut impl CryptoRng,
) -> (Ciphertext<P>, SharedSecret) {
    let mut m = [0u8; SYMBYTES];
    rng.fill_bytes(&mut m);
    let m = hash::hash_h(&m);

    // kr = G(m ‖ H(pk)); the low half seeds the encryption.
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&m);
    buf[SYMBYTES..].copy_from_slice(&pk.h);
    let mut kr = hash::hash_g(&buf);

    let mut ct_arr = P::CtArray::zeroed();
    let coins: [u8; SYMBYTES] = kr[SYMBYTES..].try_into().unwrap();
    pke::indcpa_encrypt::<P>(ct_arr.as_mut(), &m, pk.as_bytes(), &coins);

    // Overwrite the coins with H(ct) and hash down to the shared secret.
    let h_ct = hash::hash_h(ct_arr.as_ref());
    kr[SYMBYTES..].copy_from_slice(&h_ct);
    let ss = hash::hash_h(&kr);

    (
        Ciphertext { bytes: ct_arr },
        SharedSecret::from_array(ss),
    )
}

/// Decapsulate `ct`, recovering the shared secret.
///
/// On failure (tampered or mismatched ciphertext) the result is a
/// pseudorandom value derived from the rejection secret z; the comparison
/// and the secret selection are constant-time, and no error is surfaced.
pub fn decapsulate<P: ParameterSet>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let sk_bytes = sk.as_bytes();
    let ct_bytes = ct.as_bytes();

    let indcpa_sk = &sk_bytes[..P::INDCPA_SK_BYTES];
    let pk_bytes = &sk_bytes[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES];
    let h_pk = &sk_bytes[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES];
    let z = &sk_bytes[P::SK_BYTES - SYMBYTES..];

    let mut m = [0u8; SYMBYTES];
    pke::indcpa_decrypt::<P>(&mut m, ct_bytes, indcpa_sk);

    // kr' = G(m' ‖ H(pk))
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(&m);
    buf[SYMBYTES..].copy_from_slice(h_pk);
    let mut kr = hash::hash_g(&buf);

    // Re-encrypt with the derived coins into a stack buffer sized for the
    // largest parameter set.
    const MAX_CT: usize = 1504;
    let mut cmp = [0u8; MAX_CT];
    let coins: [u8; SYMBYTES] = kr[SYMBYTES..].try_into().unwrap();
    pke::indcpa_encrypt::<P>(&mut cmp[..P::CT_BYTES], &m, pk_bytes, &coins);

    let matches = ct::verify(ct_bytes, &cmp[..P::CT_BYTES]);

    // kr_lo ← H(ct), then kr_lo ← z on re-encryption failure.
    let h_ct = hash::hash_h(ct_bytes);
    kr[SYMBYTES..].copy_from_slice(&h_ct);
    ct::cmov(&mut kr[SYMBYTES..], z, !matches);

    SharedSecret::from_array(hash::hash_h(&kr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Kyber1024, Kyber512, Kyber768};
    use crate::testutil::StreamRng;

    fn roundtrip<P: ParameterSet>(seed: u64) {
        let mut rng = StreamRng(seed);
        let (pk, sk) = keypair::<P>(&mut rng);
        let (ct, ss_enc) = encapsulate(&pk, &mut rng);
        let ss_dec = decapsulate(&ct, &sk);
        assert_eq!(
            ss_enc.as_bytes(),
            ss_dec.as_bytes(),
            "{} shared secrets differ",
            P::NAME
        );
    }

    #[test]
    fn roundtrip_512() {
        roundtrip::<Kyber512>(11);
    }

    #[test]
    fn roundtrip_768() {
        roundtrip::<Kyber768>(12);
    }

    #[test]
    fn roundtrip_1024() {
        roundtrip::<Kyber1024>(13);
    }

    #[test]
    fn tampered_ciphertext_rejects_implicitly() {
        let mut rng = StreamRng(21);
        let (pk, sk) = keypair::<Kyber768>(&mut rng);
        let (ct, ss_enc) = encapsulate(&pk, &mut rng);

        let mut bad = ct.clone();
        bad.bytes[0] ^= 0x01;
        let ss_bad = decapsulate(&bad, &sk);
        assert_ne!(ss_enc.as_bytes(), ss_bad.as_bytes());

        // The rejection secret is deterministic in (ct, sk).
        let ss_bad2 = decapsulate(&bad, &sk);
        assert_eq!(ss_bad.as_bytes(), ss_bad2.as_bytes());
    }

    #[test]
    fn rejection_secret_depends_on_z() {
        // Two secret keys sharing the IND-CPA half but differing in z
        // must implicitly reject to different secrets.
        let mut rng = StreamRng(31);
        let (pk, sk) = keypair::<Kyber512>(&mut rng);
        let (ct, _) = encapsulate(&pk, &mut rng);

        let mut bad = ct.clone();
        bad.bytes[5] ^= 0x80;

        let mut twisted = sk.clone();
        twisted.bytes[Kyber512::SK_BYTES - 1] ^= 0xFF;

        let a = decapsulate(&bad, &sk);
        let b = decapsulate(&bad, &twisted);
        assert_ne!(a.as_bytes(), b.as_bytes());
    }
}
