//! Attestation record and storage trait.

use crate::StoreError;
use pulsar_types::{AttesterId, CampaignId, Measurement, Timestamp};
use serde::{Deserialize, Serialize};

/// One attester's live claim about one campaign.
///
/// Exactly one attestation exists per `(campaign_id, attester)` pair; a
/// resubmission overwrites the prior value in place and refreshes
/// `submitted_at`. Attestations are never deleted individually — they lapse
/// only through record expiry or campaign teardown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub campaign_id: CampaignId,
    pub attester: AttesterId,
    pub measurement: Measurement,
    pub submitted_at: Timestamp,
}

/// Trait for storing per-attester measurement records.
pub trait AttestationStore {
    /// Commit one submission's durable effects as a unit.
    ///
    /// If no attestation exists for the pair, the attester is appended to
    /// the campaign's positional index and the count is bumped; the
    /// attestation itself is then written (or overwritten whole on a
    /// resubmission). Every record touched has its retention horizon
    /// extended from `attestation.submitted_at`. Backends must apply all of
    /// this in a single storage transaction: on failure nothing is durable,
    /// so a caller-level retry can never index the same attester twice.
    ///
    /// Returns the campaign's updated attester count.
    fn record_submission(&self, attestation: &Attestation) -> Result<u32, StoreError>;

    /// Get the attestation for a `(campaign, attester)` pair, if any.
    fn get_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<Option<Attestation>, StoreError>;

    /// Whether an attestation exists for this pair.
    fn has_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<bool, StoreError>;
}
