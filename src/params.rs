//! Kyber parameter sets.
//!
//! The sealed [`ParameterSet`] trait encodes every size the scheme derives
//! from the module rank k, so key and ciphertext types can be generic over
//! the parameter set and all buffer lengths are checked at compile time.

use zeroize::Zeroize;

/// Ring dimension: polynomials have 256 coefficients.
pub const N: usize = 256;

/// Field modulus.
pub const Q: u16 = 7681;

/// Size in bytes of shared secrets, seeds, and hashes.
pub const SYMBYTES: usize = 32;

/// Serialised polynomial: 13 bits per coefficient.
pub const POLY_BYTES: usize = 416;

/// Compressed polynomial (ciphertext `v` component): 3 bits per coefficient.
pub const POLY_COMPRESSED_BYTES: usize = 96;

/// One compressed vector element: 11 bits per coefficient.
pub const POLYVEC_ELEM_COMPRESSED_BYTES: usize = 352;

/// Fixed-size byte storage for keys and ciphertexts.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static
{
    const LEN: usize;
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A Kyber parameter set. Sealed — only implemented for [`Kyber512`],
/// [`Kyber768`], and [`Kyber1024`].
pub trait ParameterSet: sealed::Sealed + 'static {
    /// Human-readable parameter set name.
    const NAME: &'static str;

    /// Module rank k.
    const K: usize;

    /// Centered-binomial noise parameter η.
    const ETA: usize;

    /// Serialised polynomial vector: `K × 416` bytes.
    const POLYVEC_BYTES: usize;
    /// Compressed polynomial vector: `K × 352` bytes.
    const POLYVEC_COMPRESSED_BYTES: usize;

    /// IND-CPA public key: compressed vector plus the 32-byte matrix seed.
    const INDCPA_PK_BYTES: usize;
    /// IND-CPA secret key: the NTT-domain secret vector, serialised.
    const INDCPA_SK_BYTES: usize;

    /// KEM public key (identical to the IND-CPA public key).
    const PK_BYTES: usize;
    /// KEM secret key: `indcpa_sk ‖ pk ‖ H(pk) ‖ z`.
    const SK_BYTES: usize;
    /// KEM ciphertext: compressed vector `b` plus compressed polynomial `v`.
    const CT_BYTES: usize;

    /// Initiator UAKE message: ephemeral public key plus one ciphertext.
    const UAKE_INITIATOR_MESSAGE_BYTES: usize = Self::PK_BYTES + Self::CT_BYTES;
    /// Responder UAKE message: one ciphertext.
    const UAKE_RESPONDER_MESSAGE_BYTES: usize = Self::CT_BYTES;
    /// Initiator AKE message: ephemeral public key plus one ciphertext.
    const AKE_INITIATOR_MESSAGE_BYTES: usize = Self::PK_BYTES + Self::CT_BYTES;
    /// Responder AKE message: two ciphertexts.
    const AKE_RESPONDER_MESSAGE_BYTES: usize = 2 * Self::CT_BYTES;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type CtArray: ByteArray;
}

macro_rules! impl_parameter_set {
    (
        $name:ident, NAME = $label:literal, K = $K:literal, ETA = $eta:literal,
        PK_BYTES = $pkb:literal, SK_BYTES = $skb:literal, CT_BYTES = $ctb:literal
    ) => {
        impl sealed::Sealed for $name {}

        impl ParameterSet for $name {
            const NAME: &'static str = $label;
            const K: usize = $K;
            const ETA: usize = $eta;

            const POLYVEC_BYTES: usize = $K * POLY_BYTES;
            const POLYVEC_COMPRESSED_BYTES: usize = $K * POLYVEC_ELEM_COMPRESSED_BYTES;

            const INDCPA_PK_BYTES: usize = Self::POLYVEC_COMPRESSED_BYTES + SYMBYTES;
            const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;

            const PK_BYTES: usize = $pkb;
            const SK_BYTES: usize = $skb;
            const CT_BYTES: usize = $ctb;

            type PkArray = [u8; $pkb];
            type SkArray = [u8; $skb];
            type CtArray = [u8; $ctb];
        }
    };
}

/// Kyber-512 (k = 2, η = 5), aiming at security equivalent to AES-128.
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

/// Kyber-768 (k = 3, η = 4), aiming at security equivalent to AES-192.
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

/// Kyber-1024 (k = 4, η = 3), aiming at security equivalent to AES-256.
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl_parameter_set!(
    Kyber512,
    NAME = "Kyber-512",
    K = 2,
    ETA = 5,
    PK_BYTES = 736,
    SK_BYTES = 1632,
    CT_BYTES = 800
);

impl_parameter_set!(
    Kyber768,
    NAME = "Kyber-768",
    K = 3,
    ETA = 4,
    PK_BYTES = 1088,
    SK_BYTES = 2400,
    CT_BYTES = 1152
);

impl_parameter_set!(
    Kyber1024,
    NAME = "Kyber-1024",
    K = 4,
    ETA = 3,
    PK_BYTES = 1440,
    SK_BYTES = 3168,
    CT_BYTES = 1504
);

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::POLYVEC_BYTES == <$t>::K * POLY_BYTES);
            assert!(<$t>::INDCPA_SK_BYTES == <$t>::POLYVEC_BYTES);
            assert!(<$t>::PK_BYTES == <$t>::POLYVEC_COMPRESSED_BYTES + SYMBYTES);
            assert!(<$t>::CT_BYTES == <$t>::POLYVEC_COMPRESSED_BYTES + POLY_COMPRESSED_BYTES);
            assert!(
                <$t>::SK_BYTES == <$t>::INDCPA_SK_BYTES + <$t>::PK_BYTES + 2 * SYMBYTES
            );
        };
    }
    check_params!(Kyber512);
    check_params!(Kyber768);
    check_params!(Kyber1024);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_sizes() {
        assert_eq!(Kyber512::PK_BYTES, 736);
        assert_eq!(Kyber512::SK_BYTES, 1632);
        assert_eq!(Kyber512::CT_BYTES, 800);
        assert_eq!(Kyber768::PK_BYTES, 1088);
        assert_eq!(Kyber768::SK_BYTES, 2400);
        assert_eq!(Kyber768::CT_BYTES, 1152);
        assert_eq!(Kyber1024::PK_BYTES, 1440);
        assert_eq!(Kyber1024::SK_BYTES, 3168);
        assert_eq!(Kyber1024::CT_BYTES, 1504);
    }

    #[test]
    fn kex_message_sizes() {
        assert_eq!(Kyber768::UAKE_INITIATOR_MESSAGE_BYTES, 1088 + 1152);
        assert_eq!(Kyber768::UAKE_RESPONDER_MESSAGE_BYTES, 1152);
        assert_eq!(Kyber768::AKE_INITIATOR_MESSAGE_BYTES, 1088 + 1152);
        assert_eq!(Kyber768::AKE_RESPONDER_MESSAGE_BYTES, 2 * 1152);
    }

    #[test]
    fn eta_by_rank() {
        assert_eq!((Kyber512::K, Kyber512::ETA), (2, 5));
        assert_eq!((Kyber768::K, Kyber768::ETA), (3, 4));
        assert_eq!((Kyber1024::K, Kyber1024::ETA), (4, 3));
    }
}
