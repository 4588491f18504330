//! Storage error taxonomy shared by every backend.
//!
//! `Corruption` is reserved for states the oracle's own invariants rule out,
//! such as an indexed attester with no attestation; it always aborts the
//! operation that detected it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[error("record encoding failed: {0}")]
    Serialization(String),

    #[error("store is corrupted: {0}")]
    Corruption(String),
}
