//! Timestamp type used throughout the oracle.
//!
//! Timestamps are Unix epoch seconds (UTC). Attestation freshness and record
//! expiry are compared against timestamps supplied by the caller, so tests
//! can drive time deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }

    /// This timestamp advanced by `secs`, saturating at the maximum.
    pub fn plus(&self, secs: u64) -> Timestamp {
        Timestamp(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_since_saturates() {
        let t = Timestamp::new(100);
        assert_eq!(t.elapsed_since(Timestamp::new(150)), 50);
        assert_eq!(t.elapsed_since(Timestamp::new(50)), 0);
    }

    #[test]
    fn has_expired_boundary() {
        let t = Timestamp::new(100);
        assert!(!t.has_expired(50, Timestamp::new(149)));
        assert!(t.has_expired(50, Timestamp::new(150)));
        assert!(t.has_expired(50, Timestamp::new(151)));
    }

    #[test]
    fn plus_saturates() {
        assert_eq!(Timestamp::new(10).plus(5), Timestamp::new(15));
        assert_eq!(Timestamp::new(u64::MAX).plus(1), Timestamp::new(u64::MAX));
    }
}
