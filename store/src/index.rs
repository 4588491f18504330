//! Attester index — positional enumeration of a campaign's attesters.
//!
//! The persistent substrate has no native iteration, so attester enumeration
//! is modeled as an append-only positional index `(campaign, position) →
//! attester` with a separately stored count acting as the live length. The
//! count of index entries is the single authoritative "total attesters"
//! figure; nothing else in the system maintains a second counter for the
//! same quantity.

use crate::StoreError;
use pulsar_types::{AttesterId, CampaignId};

/// Trait for reading the per-campaign attester index.
///
/// The index is append-only and written exclusively through
/// [`AttestationStore::record_submission`], which appends an entry and bumps
/// the count inside the same transaction as the attestation write. This
/// trait exposes the read side the consensus traversal needs.
///
/// [`AttestationStore::record_submission`]: crate::AttestationStore::record_submission
pub trait AttesterIndexStore {
    /// Get the attester at `position` (0-based). Positions are contiguous:
    /// every position in `0..attester_count(campaign)` resolves.
    fn attester_at(&self, campaign: CampaignId, position: u32) -> Result<AttesterId, StoreError>;

    /// Number of distinct attesters that have ever submitted for this
    /// campaign. This is the authoritative quorum input.
    fn attester_count(&self, campaign: CampaignId) -> Result<u32, StoreError>;
}
