//! Consensus builder — recomputes a campaign's consensus from the full
//! attestation set.
//!
//! The builder always reads every stored attestation in index order rather
//! than trusting the values carried by the triggering submission. Index
//! positions are assigned once, at an attester's first submission, so the
//! traversal order is canonical and independent of resubmission timing.
//! Averages use integer division (truncation toward zero): fractional
//! remainders are dropped, not rounded, making repeated recomputation
//! reproducible bit-for-bit.

use crate::error::OracleError;
use pulsar_store::{
    Attestation, AttestationStore, AttesterIndexStore, ConsensusStore, ExpiryStore,
    OracleConsensus, OracleStore, RecordKey, StoreError,
};
use pulsar_types::{CampaignId, Timestamp};

pub struct ConsensusBuilder;

impl ConsensusBuilder {
    /// Recompute and persist the consensus for a campaign.
    ///
    /// Reads the full attester index (positions `0..n`), looks up every
    /// current attestation, aggregates, and replaces the consensus record
    /// as a whole. On any failure — including accumulator overflow —
    /// nothing is written and any prior record stands.
    pub fn rebuild<S: OracleStore>(
        store: &S,
        campaign: CampaignId,
        now: Timestamp,
    ) -> Result<OracleConsensus, OracleError> {
        let n = store.attester_index().attester_count(campaign)?;
        let mut attestations = Vec::with_capacity(n as usize);
        for position in 0..n {
            let attester = store.attester_index().attester_at(campaign, position)?;
            let attestation = store
                .attestations()
                .get_attestation(campaign, &attester)?
                .ok_or_else(|| {
                    StoreError::Corruption(format!(
                        "attester {attester} is indexed at position {position} for \
                         campaign {campaign} but has no attestation"
                    ))
                })?;
            attestations.push(attestation);
        }

        let consensus = Self::aggregate(campaign, &attestations, now)?;
        store.consensus().put_consensus(&consensus)?;
        store
            .expiry()
            .extend_expiry(RecordKey::Consensus(campaign), now)?;
        Ok(consensus)
    }

    /// Pure aggregation over a non-empty attestation set.
    ///
    /// Counter fields accumulate in 128 bits, score fields in 64 bits; an
    /// overflow aborts with `Overflow` rather than wrapping into a corrupted
    /// record. Under the documented input bounds this is unreachable, but
    /// the consensus record must never be silently wrong.
    pub fn aggregate(
        campaign: CampaignId,
        attestations: &[Attestation],
        now: Timestamp,
    ) -> Result<OracleConsensus, OracleError> {
        let n = attestations.len() as u32;
        if n == 0 {
            return Err(OracleError::NotReached(campaign));
        }

        let overflow = || OracleError::Overflow(campaign);
        let mut impressions: u128 = 0;
        let mut clicks: u128 = 0;
        let mut fraud: u64 = 0;
        let mut quality: u64 = 0;
        for attestation in attestations {
            let m = &attestation.measurement;
            impressions = impressions
                .checked_add(u128::from(m.impressions_verified))
                .ok_or_else(overflow)?;
            clicks = clicks
                .checked_add(u128::from(m.clicks_verified))
                .ok_or_else(overflow)?;
            fraud = fraud
                .checked_add(u64::from(m.fraud_rate_bps))
                .ok_or_else(overflow)?;
            quality = quality
                .checked_add(u64::from(m.quality_score))
                .ok_or_else(overflow)?;
        }

        Ok(OracleConsensus {
            campaign_id: campaign,
            total_attesters: n,
            avg_impressions: u64::try_from(impressions / u128::from(n))
                .map_err(|_| overflow())?,
            avg_clicks: u64::try_from(clicks / u128::from(n)).map_err(|_| overflow())?,
            avg_fraud_rate_bps: u32::try_from(fraud / u64::from(n))
                .map_err(|_| overflow())?,
            avg_quality_score: u32::try_from(quality / u64::from(n))
                .map_err(|_| overflow())?,
            consensus_reached: true,
            last_updated: now,
        })
    }
}
