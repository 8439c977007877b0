//! Back-end selection for the hot polynomial kernels.
//!
//! A vectorised implementation of the NTT, inverse NTT, pointwise
//! multiply-accumulate, and CBD sampler may be slotted in at load time; it
//! must be byte-identical to the reference. This crate currently ships the
//! reference back-end only, so the selection flag exists for API and test
//! parity: the test suite exercises every property against whichever
//! back-end is active, and [`force_reference_backend`] pins the reference
//! implementation.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::math::poly::Poly;
use crate::math::{ntt, polyvec, sample};
use crate::params::N;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Backend {
    Reference = 0,
}

/// Selected once at load; the testing hook below may reset it.
static ACTIVE: AtomicU8 = AtomicU8::new(Backend::Reference as u8);

fn active() -> Backend {
    // The reference back-end is the only one compiled in; the atomic keeps
    // the load-time selection protocol in place for a vectorised drop-in.
    debug_assert_eq!(ACTIVE.load(Ordering::Relaxed), Backend::Reference as u8);
    Backend::Reference
}

/// Returns true iff a hardware-accelerated back-end is in use.
///
/// The reference back-end is always available; this crate does not ship a
/// vectorised one, so this currently always returns false.
pub fn is_hardware_accelerated() -> bool {
    active() != Backend::Reference
}

/// Privileged testing hook: pin the reference back-end.
#[doc(hidden)]
pub fn force_reference_backend() {
    ACTIVE.store(Backend::Reference as u8, Ordering::Relaxed);
}

/// Name of the active back-end, for test labels.
#[doc(hidden)]
pub fn backend_name() -> &'static str {
    match active() {
        Backend::Reference => "reference",
    }
}

#[inline]
pub(crate) fn ntt(p: &mut [u16; N]) {
    match active() {
        Backend::Reference => ntt::ntt(p),
    }
}

#[inline]
pub(crate) fn invntt(p: &mut [u16; N]) {
    match active() {
        Backend::Reference => ntt::invntt(p),
    }
}

#[inline]
pub(crate) fn pointwise_acc(r: &mut [u16; N], a: &[Poly], b: &[Poly]) {
    match active() {
        Backend::Reference => polyvec::pointwise_acc_ref(r, a, b),
    }
}

#[inline]
pub(crate) fn cbd(r: &mut [u16; N], buf: &[u8], eta: usize) {
    match active() {
        Backend::Reference => sample::cbd(r, buf, eta),
    }
}
