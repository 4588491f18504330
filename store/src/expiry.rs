//! Record expiry — write-path retention extension.
//!
//! The substrate retains records for a bounded horizon. Every write in this
//! core is followed by an `extend_expiry` call so actively used campaigns
//! never lapse while inactive ones may. There is no background sweeper;
//! expiry is deterministic: a record lapses once `now` passes the horizon
//! set by its most recent extension.

use crate::StoreError;
use pulsar_types::{AttesterId, CampaignId, Timestamp};

/// Identifies one persistent record for expiry extension.
///
/// Mirrors the four composite key shapes the oracle writes. `encode`
/// produces the canonical byte form shared by backends: a tag byte, the
/// campaign id big-endian, then any remaining key parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordKey<'a> {
    Attestation(CampaignId, &'a AttesterId),
    IndexEntry(CampaignId, u32),
    AttesterCount(CampaignId),
    Consensus(CampaignId),
}

impl RecordKey<'_> {
    pub const TAG_ATTESTATION: u8 = 0;
    pub const TAG_INDEX_ENTRY: u8 = 1;
    pub const TAG_ATTESTER_COUNT: u8 = 2;
    pub const TAG_CONSENSUS: u8 = 3;

    /// Canonical byte encoding: `tag ++ campaign_be ++ rest`.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            RecordKey::Attestation(campaign, attester) => {
                let a = attester.as_str().as_bytes();
                let mut key = Vec::with_capacity(9 + a.len());
                key.push(Self::TAG_ATTESTATION);
                key.extend_from_slice(&campaign.to_be_bytes());
                key.extend_from_slice(a);
                key
            }
            RecordKey::IndexEntry(campaign, position) => {
                let mut key = Vec::with_capacity(13);
                key.push(Self::TAG_INDEX_ENTRY);
                key.extend_from_slice(&campaign.to_be_bytes());
                key.extend_from_slice(&position.to_be_bytes());
                key
            }
            RecordKey::AttesterCount(campaign) => {
                let mut key = Vec::with_capacity(9);
                key.push(Self::TAG_ATTESTER_COUNT);
                key.extend_from_slice(&campaign.to_be_bytes());
                key
            }
            RecordKey::Consensus(campaign) => {
                let mut key = Vec::with_capacity(9);
                key.push(Self::TAG_CONSENSUS);
                key.extend_from_slice(&campaign.to_be_bytes());
                key
            }
        }
    }
}

/// Trait for extending record retention horizons.
pub trait ExpiryStore {
    /// Extend the record's expiry horizon to at least
    /// `now + retention_secs` (the backend's configured retention). An
    /// extension never shortens an existing horizon.
    fn extend_expiry(&self, key: RecordKey<'_>, now: Timestamp) -> Result<(), StoreError>;
}
