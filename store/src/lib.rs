//! Abstract storage and collaborator traits for the PulsarTrack oracle.
//!
//! Every storage backend (LMDB for production, in-memory for testing)
//! implements these traits. The engine depends only on the traits, plus the
//! two collaborator boundaries it consumes but does not implement: the
//! attester registry and the policy store.

pub mod attestation;
pub mod consensus;
pub mod error;
pub mod expiry;
pub mod index;
pub mod policy;
pub mod registry;

pub use attestation::{Attestation, AttestationStore};
pub use consensus::{ConsensusStore, OracleConsensus};
pub use error::StoreError;
pub use expiry::{ExpiryStore, RecordKey};
pub use index::AttesterIndexStore;
pub use policy::PolicyStore;
pub use registry::AttesterRegistry;

/// Unified oracle store — accessors for the four storage concerns.
///
/// Backends implement the individual store traits and expose them through
/// this aggregate so the engine takes a single store parameter.
pub trait OracleStore {
    type Attestations: AttestationStore;
    type Index: AttesterIndexStore;
    type Consensus: ConsensusStore;
    type Expiry: ExpiryStore;

    fn attestations(&self) -> &Self::Attestations;
    fn attester_index(&self) -> &Self::Index;
    fn consensus(&self) -> &Self::Consensus;
    fn expiry(&self) -> &Self::Expiry;
}
