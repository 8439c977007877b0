//! Kyber.UAKE and Kyber.AKE — one-sided and mutually authenticated key
//! exchange composed from the KEM.
//!
//! Both protocols run in two messages. The initiator sends an ephemeral
//! public key together with a ciphertext encapsulated to the responder's
//! long-term key; the responder answers with one ciphertext (UAKE) or two
//! (AKE, the second encapsulated to the initiator's long-term key). Each
//! side derives the 32-byte session key as SHAKE-256 over the transient
//! KEM secrets in a fixed order: ephemeral leg, then (AKE only) long-term
//! leg, then the initial leg.
//!
//! Initiator state is strictly single-use: [`UakeInitiator::shared`] and
//! [`AkeInitiator::shared`] consume the state, and the contained ephemeral
//! secret key and transient secret are zeroized on drop.
//!
//! # Example: mutually authenticated key exchange
//!
//! ```
//! use kyber_rs::{keypair, Kyber768, AkeInitiator, ake_responder_shared};
//! use rand_core::TryRngCore;
//!
//! let mut rng = rand_core::OsRng.unwrap_err();
//!
//! // Both parties hold long-term key pairs, exchanged beforehand.
//! let (pk_b, sk_b) = keypair::<Kyber768>(&mut rng);
//! let (pk_a, sk_a) = keypair::<Kyber768>(&mut rng);
//!
//! // Alice initiates against Bob's long-term key.
//! let alice = AkeInitiator::new(&pk_b, &mut rng);
//!
//! // Bob responds, authenticating Alice via her long-term public key.
//! let (msg_b, bob_secret) = ake_responder_shared(&sk_b, &mut rng, alice.message(), &pk_a);
//!
//! // Alice completes the exchange with her long-term secret key.
//! let alice_secret = alice.shared(&msg_b, &sk_a);
//!
//! assert_eq!(alice_secret.as_bytes(), bob_secret.as_bytes());
//! ```

use rand_core::CryptoRng;

use crate::hash;
use crate::kem::{decapsulate, encapsulate, keypair};
use crate::params::ParameterSet;
use crate::types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// An initiator-side UAKE instance.
///
/// Created with [`UakeInitiator::new`]; must be used for exactly one key
/// exchange.
pub struct UakeInitiator<P: ParameterSet> {
    message: Vec<u8>,
    esk: SecretKey<P>,
    tk: SharedSecret,
}

impl<P: ParameterSet> UakeInitiator<P> {
    /// Start a UAKE against the responder's long-term public key.
    ///
    /// Generates an ephemeral KEM key pair and encapsulates to `pk`; the
    /// RNG is drawn for the key pair first, then for the encapsulation.
    pub fn new(pk: &PublicKey<P>, rng: &mut impl CryptoRng) -> Self {
        let (epk, esk) = keypair::<P>(rng);
        let (ct, tk) = encapsulate(pk, rng);

        let mut message = Vec::with_capacity(P::UAKE_INITIATOR_MESSAGE_BYTES);
        message.extend_from_slice(epk.as_bytes());
        message.extend_from_slice(ct.as_bytes());

        Self { message, esk, tk }
    }

    /// The message to send to the responder: `epk ‖ ct`.
    #[inline]
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Derive the shared secret from the responder's message, consuming
    /// the state.
    ///
    /// # Panics
    ///
    /// Panics if `recv` is not `P::UAKE_RESPONDER_MESSAGE_BYTES` long.
    pub fn shared(self, recv: &[u8]) -> SharedSecret {
        assert_eq!(
            recv.len(),
            P::UAKE_RESPONDER_MESSAGE_BYTES,
            "kyber: invalid message size"
        );
        let tk_eph = decapsulate(&Ciphertext::<P>::from_bytes(recv), &self.esk);
        SharedSecret::from_array(hash::kdf(&[tk_eph.as_bytes(), self.tk.as_bytes()]))
    }
}

impl<P: ParameterSet> core::fmt::Debug for UakeInitiator<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("UakeInitiator([REDACTED])")
    }
}

/// Responder side of the UAKE: consumes the initiator's message, returns
/// the responder message and the shared secret.
///
/// # Panics
///
/// Panics if `recv` is not `P::UAKE_INITIATOR_MESSAGE_BYTES` long.
pub fn uake_responder_shared<P: ParameterSet>(
    sk: &SecretKey<P>,
    rng: &mut impl CryptoRng,
    recv: &[u8],
) -> (Vec<u8>, SharedSecret) {
    assert_eq!(
        recv.len(),
        P::UAKE_INITIATOR_MESSAGE_BYTES,
        "kyber: invalid message size"
    );
    let (raw_epk, ct1) = recv.split_at(P::PK_BYTES);
    let epk = PublicKey::<P>::from_bytes(raw_epk).expect("message length already checked");

    let (ct2, tk_eph) = encapsulate(&epk, rng);
    let tk_init = decapsulate(&Ciphertext::<P>::from_bytes(ct1), sk);

    let ss = SharedSecret::from_array(hash::kdf(&[tk_eph.as_bytes(), tk_init.as_bytes()]));
    (ct2.as_bytes().to_vec(), ss)
}

/// An initiator-side AKE instance.
///
/// Created with [`AkeInitiator::new`]; must be used for exactly one key
/// exchange.
pub struct AkeInitiator<P: ParameterSet> {
    message: Vec<u8>,
    esk: SecretKey<P>,
    tk: SharedSecret,
}

impl<P: ParameterSet> AkeInitiator<P> {
    /// Start an AKE against the responder's long-term public key.
    ///
    /// The first flight is identical to the UAKE case.
    pub fn new(pk: &PublicKey<P>, rng: &mut impl CryptoRng) -> Self {
        let UakeInitiator { message, esk, tk } = UakeInitiator::new(pk, rng);
        Self { message, esk, tk }
    }

    /// The message to send to the responder: `epk ‖ ct`.
    #[inline]
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// Derive the shared secret from the responder's message and the
    /// initiator's long-term secret key, consuming the state.
    ///
    /// The responder message carries two ciphertexts: one to the ephemeral
    /// key, one to the long-term key, in that order.
    ///
    /// # Panics
    ///
    /// Panics if `recv` is not `P::AKE_RESPONDER_MESSAGE_BYTES` long.
    pub fn shared(self, recv: &[u8], initiator_sk: &SecretKey<P>) -> SharedSecret {
        assert_eq!(
            recv.len(),
            P::AKE_RESPONDER_MESSAGE_BYTES,
            "kyber: invalid message size"
        );
        let (ct_eph, ct_long) = recv.split_at(P::CT_BYTES);

        let tk_eph = decapsulate(&Ciphertext::<P>::from_bytes(ct_eph), &self.esk);
        let tk_long = decapsulate(&Ciphertext::<P>::from_bytes(ct_long), initiator_sk);

        SharedSecret::from_array(hash::kdf(&[
            tk_eph.as_bytes(),
            tk_long.as_bytes(),
            self.tk.as_bytes(),
        ]))
    }
}

impl<P: ParameterSet> core::fmt::Debug for AkeInitiator<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("AkeInitiator([REDACTED])")
    }
}

/// Responder side of the AKE: consumes the initiator's message and the
/// initiator's long-term public key, returns the responder message
/// (`ct_to_ephemeral ‖ ct_to_long_term`) and the shared secret.
///
/// # Panics
///
/// Panics if `recv` is not `P::AKE_INITIATOR_MESSAGE_BYTES` long.
pub fn ake_responder_shared<P: ParameterSet>(
    sk: &SecretKey<P>,
    rng: &mut impl CryptoRng,
    recv: &[u8],
    peer_pk: &PublicKey<P>,
) -> (Vec<u8>, SharedSecret) {
    assert_eq!(
        recv.len(),
        P::AKE_INITIATOR_MESSAGE_BYTES,
        "kyber: invalid message size"
    );
    let (raw_epk, ct1) = recv.split_at(P::PK_BYTES);
    let epk = PublicKey::<P>::from_bytes(raw_epk).expect("message length already checked");

    let mut message = Vec::with_capacity(P::AKE_RESPONDER_MESSAGE_BYTES);

    let (ct_eph, tk_eph) = encapsulate(&epk, rng);
    message.extend_from_slice(ct_eph.as_bytes());

    let (ct_long, tk_long) = encapsulate(peer_pk, rng);
    message.extend_from_slice(ct_long.as_bytes());

    let tk_init = decapsulate(&Ciphertext::<P>::from_bytes(ct1), sk);

    let ss = SharedSecret::from_array(hash::kdf(&[
        tk_eph.as_bytes(),
        tk_long.as_bytes(),
        tk_init.as_bytes(),
    ]));
    (message, ss)
}
