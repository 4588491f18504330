//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the oracle (clock, attester registry,
//! policy store, persistent storage) are abstracted behind traits. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod registry;
pub mod store;

pub use clock::NullClock;
pub use registry::{NullPolicy, NullRegistry};
pub use store::NullOracleStore;
