//! Oracle entry points — submission, reads, and quorum triggering.

use crate::builder::ConsensusBuilder;
use crate::error::OracleError;
use pulsar_store::{
    Attestation, AttestationStore, AttesterIndexStore, AttesterRegistry, ConsensusStore,
    OracleConsensus, OracleStore, PolicyStore,
};
use pulsar_types::{AttesterId, CampaignId, Measurement, Timestamp};
use tracing::{debug, info, warn};

/// The performance oracle: collects attestations from authorized reporters
/// and maintains the per-campaign consensus.
///
/// Writes go through the store boundary's transactional operations, and the
/// substrate serializes calls per campaign, so there is no interleaving of
/// a read-modify-write sequence and no locking at this layer.
pub struct PerformanceOracle<S, R, P>
where
    S: OracleStore,
    R: AttesterRegistry,
    P: PolicyStore,
{
    store: S,
    registry: R,
    policy: P,
}

impl<S, R, P> PerformanceOracle<S, R, P>
where
    S: OracleStore,
    R: AttesterRegistry,
    P: PolicyStore,
{
    pub fn new(store: S, registry: R, policy: P) -> Self {
        Self {
            store,
            registry,
            policy,
        }
    }

    /// Submit a measurement for a campaign.
    ///
    /// A first submission by an attester appends them to the campaign's
    /// index; a resubmission overwrites their single attestation in place.
    /// After the write, the quorum check runs synchronously and recomputes
    /// the consensus whenever the distinct-attester count is at or above
    /// the configured floor. Returns the updated attester count.
    ///
    /// Authorization and bounds checks precede every write, and the write
    /// itself commits as one unit through the store boundary, so a failed
    /// submission leaves all stores untouched and a retry counts the
    /// attester exactly once.
    pub fn submit(
        &self,
        campaign: CampaignId,
        attester: AttesterId,
        measurement: Measurement,
        now: Timestamp,
    ) -> Result<u32, OracleError> {
        if !self.registry.is_authorized(&attester) {
            return Err(OracleError::Unauthorized(attester));
        }
        measurement.validate()?;

        let attestation = Attestation {
            campaign_id: campaign,
            attester,
            measurement,
            submitted_at: now,
        };
        let count = self.store.attestations().record_submission(&attestation)?;
        debug!(%campaign, attester = %attestation.attester, count, "attestation stored");

        self.check_quorum(campaign, count, now)?;
        Ok(count)
    }

    /// Get an attester's current attestation for a campaign.
    pub fn attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<Attestation, OracleError> {
        self.store
            .attestations()
            .get_attestation(campaign, attester)?
            .ok_or_else(|| OracleError::NotFound {
                campaign,
                attester: attester.clone(),
            })
    }

    /// Number of distinct attesters that have submitted for a campaign.
    pub fn attestation_count(&self, campaign: CampaignId) -> Result<u32, OracleError> {
        Ok(self.store.attester_index().attester_count(campaign)?)
    }

    /// Get the campaign's consensus.
    ///
    /// Fails with `NotReached` — never a default value masquerading as a
    /// result — while the campaign is below quorum. The campaign may well
    /// have attestations at that point, just not enough.
    pub fn consensus(&self, campaign: CampaignId) -> Result<OracleConsensus, OracleError> {
        self.store
            .consensus()
            .get_consensus(campaign)?
            .ok_or(OracleError::NotReached(campaign))
    }

    /// Recompute the consensus if the campaign is at or above quorum.
    ///
    /// Once reached, every later submission lands here again, so the
    /// consensus always reflects the current complete attestation set
    /// rather than a snapshot from the moment the threshold was crossed.
    fn check_quorum(
        &self,
        campaign: CampaignId,
        count: u32,
        now: Timestamp,
    ) -> Result<(), OracleError> {
        let min_attesters = self.policy.min_attesters();
        if min_attesters <= 1 {
            warn!(
                min_attesters,
                "quorum floor of {min_attesters} degenerates to last-submission-wins"
            );
        }
        if count < min_attesters || count == 0 {
            return Ok(());
        }

        let previously_reached = self.store.consensus().get_consensus(campaign)?.is_some();
        let consensus = ConsensusBuilder::rebuild(&self.store, campaign, now)?;
        if previously_reached {
            debug!(%campaign, total_attesters = consensus.total_attesters, "consensus recomputed");
        } else {
            info!(%campaign, total_attesters = consensus.total_attesters, "consensus reached");
        }
        Ok(())
    }
}
