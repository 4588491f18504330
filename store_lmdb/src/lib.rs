//! LMDB storage backend for the PulsarTrack oracle.
//!
//! Implements all storage traits from `pulsar-store` using the `heed` LMDB
//! bindings. Each record class maps to one LMDB database within a single
//! environment; a separate `expiry` database tracks every record's
//! retention horizon so `purge_expired` can drop lapsed data without
//! scanning the data databases.

pub mod attestation;
pub mod consensus;
pub mod environment;
pub mod error;
pub mod expiry;
pub mod index;
pub mod store;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use store::LmdbOracleStore;
