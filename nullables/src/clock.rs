//! Nullable clock — deterministic time for testing.
//!
//! Oracle entry points take an explicit `now: Timestamp`, so tests feed
//! them from this clock instead of the system time: submissions land at
//! known instants and retention horizons fall exactly where a test expects.

use pulsar_types::Timestamp;
use std::cell::Cell;

/// A test clock that only moves when told to.
pub struct NullClock {
    current: Cell<Timestamp>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(Timestamp::new(initial_secs)),
        }
    }

    /// The current instant, to pass as an entry point's `now`.
    pub fn now(&self) -> Timestamp {
        self.current.get()
    }

    /// Move forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get().plus(secs));
    }

    /// Jump to an absolute instant.
    pub fn set(&self, secs: u64) {
        self.current.set(Timestamp::new(secs));
    }
}
