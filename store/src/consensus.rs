//! Consensus record and storage trait.

use crate::StoreError;
use pulsar_types::{CampaignId, Timestamp};
use serde::{Deserialize, Serialize};

/// The derived consensus for one campaign.
///
/// Whenever this record exists with `consensus_reached == true`, the four
/// averages were computed from every attestation stored for the campaign at
/// the time of the last write — not from a subset, and not from only the
/// most recent submission. Owned and rewritten exclusively by the consensus
/// builder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleConsensus {
    pub campaign_id: CampaignId,
    /// Distinct attester count at the time of computation.
    pub total_attesters: u32,
    pub avg_impressions: u64,
    pub avg_clicks: u64,
    pub avg_fraud_rate_bps: u32,
    pub avg_quality_score: u32,
    /// True once quorum has ever been met for this campaign.
    pub consensus_reached: bool,
    /// Timestamp of the most recent (re)computation.
    pub last_updated: Timestamp,
}

/// Trait for storing the latest computed consensus per campaign.
pub trait ConsensusStore {
    /// Replace the campaign's consensus record as a whole. A computation
    /// either fully replaces all four averages and the metadata, or does
    /// not write at all — never a partial update.
    fn put_consensus(&self, consensus: &OracleConsensus) -> Result<(), StoreError>;

    /// Get the latest consensus for a campaign, if one has been computed.
    fn get_consensus(&self, campaign: CampaignId)
        -> Result<Option<OracleConsensus>, StoreError>;
}
