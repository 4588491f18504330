//! Nullable registry and policy — programmatic authorization and quorum
//! configuration for testing.

use pulsar_store::{AttesterRegistry, PolicyStore};
use pulsar_types::AttesterId;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// An in-memory attester registry for testing.
///
/// Authorizations are granted and revoked programmatically; revocation
/// takes effect on the attester's next submission, matching the production
/// registry's contract.
pub struct NullRegistry {
    authorized: Mutex<HashSet<AttesterId>>,
}

impl NullRegistry {
    pub fn new() -> Self {
        Self {
            authorized: Mutex::new(HashSet::new()),
        }
    }

    /// A registry that already authorizes the given attesters.
    pub fn with_authorized<I>(attesters: I) -> Self
    where
        I: IntoIterator<Item = AttesterId>,
    {
        Self {
            authorized: Mutex::new(attesters.into_iter().collect()),
        }
    }

    /// Grant the oracle role to an attester.
    pub fn authorize(&self, attester: AttesterId) {
        self.authorized.lock().unwrap().insert(attester);
    }

    /// Revoke the oracle role from an attester.
    pub fn revoke(&self, attester: &AttesterId) {
        self.authorized.lock().unwrap().remove(attester);
    }
}

impl Default for NullRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AttesterRegistry for NullRegistry {
    fn is_authorized(&self, attester: &AttesterId) -> bool {
        self.authorized.lock().unwrap().contains(attester)
    }
}

/// A policy store whose quorum floor can be changed mid-test.
pub struct NullPolicy {
    min_attesters: AtomicU32,
}

impl NullPolicy {
    pub fn new(min_attesters: u32) -> Self {
        Self {
            min_attesters: AtomicU32::new(min_attesters),
        }
    }

    /// Change the quorum floor; takes effect on the next submission.
    pub fn set_min_attesters(&self, min: u32) {
        self.min_attesters.store(min, Ordering::Relaxed);
    }
}

impl PolicyStore for NullPolicy {
    fn min_attesters(&self) -> u32 {
        self.min_attesters.load(Ordering::Relaxed)
    }
}
