//! Deterministic KEM test vectors.
//!
//! Drives the KEM with the reference SURF-based test RNG and hashes the
//! transcript of every intermediate byte string (rnd_kp, rnd_z, pk, sk,
//! rnd_enc, ct, key_B, key_A — one lowercase-hex line each) across 1000
//! iterations; the SHA-256 digest must match the per-parameter-set ground
//! truth. Any divergence in RNG consumption order, sampling, arithmetic,
//! or packing shows up here.

use std::collections::VecDeque;

use kyber_rs::{
    accel, decapsulate, encapsulate, keypair, Kyber1024, Kyber512, Kyber768, ParameterSet,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

const NR_TEST_VECTORS: usize = 1000;

// ---------------------------------------------------------------------------
// SURF test RNG (records every read for transcript checking)
// ---------------------------------------------------------------------------

struct TestRng {
    seed: [u32; 32],
    input: [u32; 12],
    out: [u32; 8],
    outleft: usize,
    hist: VecDeque<Vec<u8>>,
}

impl TestRng {
    fn new() -> Self {
        TestRng {
            seed: [
                3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9, 3, 2, 3, 8, 4, 6, 2, 6, 4, 3, 3, 8,
                3, 2, 7, 9, 5,
            ],
            input: [0u32; 12],
            out: [0u32; 8],
            outleft: 0,
            hist: VecDeque::new(),
        }
    }

    fn surf(&mut self) {
        const ROTATES: [u32; 12] = [5, 7, 9, 13, 5, 7, 9, 13, 5, 7, 9, 13];

        let mut t = [0u32; 12];
        for (i, v) in t.iter_mut().enumerate() {
            *v = self.input[i] ^ self.seed[12 + i];
        }
        for (i, o) in self.out.iter_mut().enumerate() {
            *o = self.seed[24 + i];
        }

        let mut x = t[11];
        let mut sum = 0u32;
        for _ in 0..2 {
            for _ in 0..16 {
                sum = sum.wrapping_add(0x9e37_79b9);
                for (i, &b) in ROTATES.iter().enumerate() {
                    t[i] = t[i]
                        .wrapping_add((x ^ self.seed[i]).wrapping_add(sum) ^ x.rotate_left(b));
                    x = t[i];
                }
            }
            for (i, o) in self.out.iter_mut().enumerate() {
                *o ^= t[i + 4];
            }
        }
    }

    fn pop_hist(&mut self) -> Vec<u8> {
        self.hist.pop_front().expect("pop underflow")
    }
}

impl RngCore for TestRng {
    fn next_u32(&mut self) -> u32 {
        let mut b = [0u8; 4];
        self.fill_bytes(&mut b);
        u32::from_le_bytes(b)
    }

    fn next_u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        self.fill_bytes(&mut b);
        u64::from_le_bytes(b)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            if self.outleft == 0 {
                for i in 0..4 {
                    self.input[i] = self.input[i].wrapping_add(1);
                    if self.input[i] != 0 {
                        break;
                    }
                }
                self.surf();
                self.outleft = 8;
            }
            self.outleft -= 1;
            *byte = self.out[self.outleft] as u8;
        }
        self.hist.push_back(dst.to_vec());
    }
}

impl CryptoRng for TestRng {}

// ---------------------------------------------------------------------------
// Transcript digests
// ---------------------------------------------------------------------------

fn hash_line(h: &mut Sha256, bytes: &[u8]) {
    h.update(hex::encode(bytes).as_bytes());
    h.update(b"\n");
}

fn compact_vectors_digest<P: ParameterSet>() -> String {
    let mut h = Sha256::new();
    let mut rng = TestRng::new();

    for _ in 0..NR_TEST_VECTORS {
        let (pk, sk) = keypair::<P>(&mut rng);
        let rnd_kp = rng.pop_hist();
        let rnd_z = rng.pop_hist();
        hash_line(&mut h, &rnd_kp);
        hash_line(&mut h, &rnd_z);
        hash_line(&mut h, pk.as_bytes());
        hash_line(&mut h, sk.as_bytes());

        let (ct, key_b) = encapsulate(&pk, &mut rng);
        let rnd_enc = rng.pop_hist();
        hash_line(&mut h, &rnd_enc);
        hash_line(&mut h, ct.as_bytes());
        hash_line(&mut h, key_b.as_bytes());

        let key_a = decapsulate(&ct, &sk);
        hash_line(&mut h, key_a.as_bytes());
    }

    hex::encode(h.finalize())
}

#[test]
fn surf_rng_reference_stream() {
    let mut rng = TestRng::new();
    let mut first = [0u8; 32];
    let mut second = [0u8; 32];
    rng.fill_bytes(&mut first);
    rng.fill_bytes(&mut second);
    assert_eq!(
        hex::encode(first),
        "934d60b35624d740b30a7f227af2ae7c678e4e04e13c5f509eade2b79aea77e2"
    );
    assert_eq!(
        hex::encode(second),
        "3e2a2ea6c9c476fc4937b013c993a793d6c0ab9960695ba838f649da539ca3d0"
    );
    assert_eq!(rng.pop_hist(), first.to_vec());
    assert_eq!(rng.pop_hist(), second.to_vec());
}

#[test]
fn end_to_end_reference_iteration() {
    // Iteration 0 at Kyber-768, field by field.
    accel::force_reference_backend();
    let mut rng = TestRng::new();

    let (pk, sk) = keypair::<Kyber768>(&mut rng);
    assert_eq!(
        hex::encode(rng.pop_hist()),
        "934d60b35624d740b30a7f227af2ae7c678e4e04e13c5f509eade2b79aea77e2"
    );
    assert_eq!(
        hex::encode(rng.pop_hist()),
        "3e2a2ea6c9c476fc4937b013c993a793d6c0ab9960695ba838f649da539ca3d0"
    );
    assert_eq!(
        hex::encode(Sha256::digest(pk.as_bytes())),
        "271ebd5a0c274410afdb59ac4059a8b15b6ea013fd787d5e4727daf25a723836"
    );
    assert_eq!(
        hex::encode(Sha256::digest(sk.as_bytes())),
        "2c61ef781efc78697a541e1ea4c681c519302a9b5ac79fca9e3cd387b41fb2d7"
    );

    let (ct, key_b) = encapsulate(&pk, &mut rng);
    assert_eq!(
        hex::encode(rng.pop_hist()),
        "bac5ba881dd35c59719670004692d675b83c98db6a0e55800bafeb7e70491bf4"
    );
    assert_eq!(
        hex::encode(Sha256::digest(ct.as_bytes())),
        "365b910f9c24085a9e70e78e49d0267b735c13bc12c13efdef8a3a09d022906a"
    );
    assert_eq!(
        hex::encode(key_b.as_bytes()),
        "23c7a3ae29223b8114db02fa5cf8834b11e48fc55e69534b032a695516cd93ee"
    );

    let key_a = decapsulate(&ct, &sk);
    assert_eq!(key_a.as_bytes(), key_b.as_bytes());
}

#[test]
fn kem_vectors_kyber512() {
    accel::force_reference_backend();
    assert_eq!(
        compact_vectors_digest::<Kyber512>(),
        "6973360b86dbd7ceaef621e913cba98f2e95cd335a7cf22cca0f24dbb7e47da4"
    );
}

#[test]
fn kem_vectors_kyber768() {
    accel::force_reference_backend();
    assert_eq!(
        compact_vectors_digest::<Kyber768>(),
        "8f1673ccf9db0851dbe4826ade672e54441a59969994814eb35bd231628f28ee"
    );
}

#[test]
fn kem_vectors_kyber1024() {
    accel::force_reference_backend();
    assert_eq!(
        compact_vectors_digest::<Kyber1024>(),
        "1c3839c0cbbe65c6decf443720efa9b949b9eef5a537b4cc421f22334c91c06a"
    );
}
