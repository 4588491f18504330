//! Fundamental types for the PulsarTrack performance oracle.
//!
//! This crate defines the vocabulary shared across every other crate in the
//! workspace: campaign and attester identifiers, timestamps, measurement
//! payloads with their bounds, and oracle configuration parameters.

pub mod attester;
pub mod campaign;
pub mod measurement;
pub mod params;
pub mod time;

pub use attester::AttesterId;
pub use campaign::CampaignId;
pub use measurement::{Measurement, MeasurementError, MAX_FRAUD_RATE_BPS, MAX_QUALITY_SCORE};
pub use params::OracleParams;
pub use time::Timestamp;
