//! `kyber-rs` — the Kyber IND-CCA2-secure key encapsulation mechanism.
//!
//! Implements the Kyber KEM, based on the hardness of the learning-with-errors
//! problem over module lattices, for the Kyber-512, Kyber-768, and Kyber-1024
//! parameter sets (ring dimension n = 256, modulus q = 7681, module rank
//! k = 2, 3, 4 with centered-binomial noise η = 5, 4, 3).
//!
//! On top of the KEM, the [`kex`] module provides the Kyber.UAKE and Kyber.AKE
//! key exchanges for users that need a one-sided or mutually authenticated
//! handshake.
//!
//! # Design principles
//!
//! - **No `unsafe`** — enforced by `#![deny(unsafe_code)]`.
//! - **RAII zeroization** of secret material via the `zeroize` crate.
//! - **Constant-time** reductions, message codecs, and decapsulation
//!   compare/select; decapsulation failure is never surfaced as an error
//!   (implicit rejection).
//! - **Type-level parameter sets** — keys and ciphertexts are generic over
//!   [`params::ParameterSet`], so mixing parameter sets is a compile error.
//!
//! # Example: key encapsulation
//!
//! ```
//! use kyber_rs::{keypair, encapsulate, decapsulate, Kyber768};
//! use rand_core::TryRngCore;
//!
//! let mut rng = rand_core::OsRng.unwrap_err();
//!
//! // Alice generates a key pair and sends the public key to Bob.
//! let (pk, sk) = keypair::<Kyber768>(&mut rng);
//!
//! // Bob encapsulates a shared secret to Alice's public key.
//! let (ct, bob_secret) = encapsulate(&pk, &mut rng);
//!
//! // Alice decapsulates the ciphertext.
//! let alice_secret = decapsulate(&ct, &sk);
//!
//! assert_eq!(alice_secret.as_bytes(), bob_secret.as_bytes());
//! ```
//!
//! # Example: unilaterally authenticated key exchange
//!
//! ```
//! use kyber_rs::{keypair, Kyber768, UakeInitiator, uake_responder_shared};
//! use rand_core::TryRngCore;
//!
//! let mut rng = rand_core::OsRng.unwrap_err();
//!
//! // Bob holds a long-term key pair; Alice knows the public half.
//! let (pk_b, sk_b) = keypair::<Kyber768>(&mut rng);
//!
//! // Alice initiates. The state must be used for exactly one exchange.
//! let alice = UakeInitiator::new(&pk_b, &mut rng);
//!
//! // Bob answers with a responder message and his shared secret.
//! let (msg_b, bob_secret) = uake_responder_shared(&sk_b, &mut rng, alice.message());
//!
//! // Alice completes the exchange; `shared` consumes the state.
//! let alice_secret = alice.shared(&msg_b);
//!
//! assert_eq!(alice_secret.as_bytes(), bob_secret.as_bytes());
//! ```

#![deny(unsafe_code)]

pub mod accel;
pub mod ct;
pub mod hash;
pub mod kem;
pub mod kex;
pub mod math;
pub mod params;
pub mod pke;
#[cfg(test)]
mod testutil;
pub mod types;

// Re-export the public API surface.
pub use accel::is_hardware_accelerated;
pub use kem::{decapsulate, encapsulate, keypair, KemError};
pub use kex::{ake_responder_shared, uake_responder_shared, AkeInitiator, UakeInitiator};
pub use params::{Kyber1024, Kyber512, Kyber768, ParameterSet};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
