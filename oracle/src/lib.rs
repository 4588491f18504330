//! Multi-attester performance consensus engine.
//!
//! Authorized attesters submit independent measurements of a campaign's
//! performance (impressions, clicks, fraud rate, quality score). Once a
//! quorum of distinct attesters exists, the engine derives a consensus by
//! averaging over *all* stored attestations, and recomputes it on every
//! later submission. Because every recomputation reads the full attestation
//! set, no single attester can dominate the result — a reporter who submits
//! last with extreme values moves each average by at most `1/n` of the
//! distance between their value and the prior mean.

pub mod builder;
pub mod engine;
pub mod error;

pub use builder::ConsensusBuilder;
pub use engine::PerformanceOracle;
pub use error::OracleError;
