//! Key, ciphertext, and shared-secret types.
//!
//! Secret material is zeroized on drop. Keys are immutable once
//! constructed; the public key carries a cached SHA3-256 digest of its
//! serialisation, recomputed on deserialisation and never serialised
//! itself.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::hash;
use crate::kem::KemError;
use crate::params::{ByteArray, ParameterSet, SYMBYTES};

/// A Kyber public (encapsulation) key.
pub struct PublicKey<P: ParameterSet> {
    pub(crate) bytes: P::PkArray,
    /// Cached H(pk); feeds both encapsulation and the multi-target
    /// countermeasure in the secret key.
    pub(crate) h: [u8; SYMBYTES],
}

impl<P: ParameterSet> PublicKey<P> {
    pub(crate) fn from_array(bytes: P::PkArray) -> Self {
        let h = hash::hash_h(bytes.as_ref());
        Self { bytes, h }
    }

    /// Deserialize a public key from its byte encoding.
    pub fn from_bytes(b: &[u8]) -> Result<Self, KemError> {
        if b.len() != P::PK_BYTES {
            return Err(KemError::InvalidKeySize);
        }
        let mut bytes = P::PkArray::zeroed();
        bytes.as_mut().copy_from_slice(b);
        Ok(Self::from_array(bytes))
    }

    /// The byte serialisation of this key.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
            h: self.h,
        }
    }
}

impl<P: ParameterSet> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("params", &P::NAME)
            .field("len", &P::PK_BYTES)
            .finish_non_exhaustive()
    }
}

/// A Kyber secret (decapsulation) key: `indcpa_sk ‖ pk ‖ H(pk) ‖ z`.
/// Zeroized on drop.
pub struct SecretKey<P: ParameterSet> {
    pub(crate) bytes: P::SkArray,
}

impl<P: ParameterSet> SecretKey<P> {
    pub(crate) fn from_array(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    /// Deserialize a secret key from its byte encoding.
    ///
    /// Verifies that the embedded digest matches SHA3-256 of the embedded
    /// public key; a mismatch yields [`KemError::InvalidPrivateKey`].
    pub fn from_bytes(b: &[u8]) -> Result<Self, KemError> {
        if b.len() != P::SK_BYTES {
            return Err(KemError::InvalidKeySize);
        }
        let pk = &b[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES];
        let h = &b[P::SK_BYTES - 2 * SYMBYTES..P::SK_BYTES - SYMBYTES];
        if hash::hash_h(pk).as_slice() != h {
            return Err(KemError::InvalidPrivateKey);
        }
        let mut bytes = P::SkArray::zeroed();
        bytes.as_mut().copy_from_slice(b);
        Ok(Self { bytes })
    }

    /// The byte serialisation of this key.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// The public key embedded in this secret key.
    pub fn public_key(&self) -> PublicKey<P> {
        let mut pk = P::PkArray::zeroed();
        pk.as_mut()
            .copy_from_slice(&self.bytes.as_ref()[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES]);
        PublicKey::from_array(pk)
    }
}

impl<P: ParameterSet> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: ParameterSet> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: ParameterSet> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: ParameterSet> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// A Kyber KEM ciphertext.
pub struct Ciphertext<P: ParameterSet> {
    pub(crate) bytes: P::CtArray,
}

impl<P: ParameterSet> Ciphertext<P> {
    /// Wrap a received ciphertext.
    ///
    /// # Panics
    ///
    /// Panics if `b` is not exactly `P::CT_BYTES` long. The length is a
    /// public parameter, so a wrong-sized buffer is a caller contract
    /// violation rather than a decapsulation failure.
    pub fn from_bytes(b: &[u8]) -> Self {
        assert_eq!(b.len(), P::CT_BYTES, "kyber: invalid ciphertext size");
        let mut bytes = P::CtArray::zeroed();
        bytes.as_mut().copy_from_slice(b);
        Self { bytes }
    }

    /// The byte serialisation of this ciphertext.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: ParameterSet> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("params", &P::NAME)
            .field("len", &P::CT_BYTES)
            .finish_non_exhaustive()
    }
}

/// A 32-byte shared secret. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SYMBYTES],
}

impl SharedSecret {
    pub(crate) fn from_array(bytes: [u8; SYMBYTES]) -> Self {
        Self { bytes }
    }

    /// View the secret as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
