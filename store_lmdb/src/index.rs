//! LMDB read side of the attester index.
//!
//! Entries and the count are written by `record_submission` in the same
//! write transaction as the attestation itself; this module only resolves
//! positions and counts for the consensus traversal.

use pulsar_store::{AttesterIndexStore, RecordKey, StoreError};
use pulsar_types::{AttesterId, CampaignId};

use crate::store::LmdbOracleStore;
use crate::LmdbError;

pub(crate) fn count_key(campaign: CampaignId) -> Vec<u8> {
    RecordKey::AttesterCount(campaign).encode()
}

pub(crate) fn decode_count(bytes: &[u8]) -> Result<u32, LmdbError> {
    let arr: [u8; 4] = bytes.try_into().map_err(|_| {
        LmdbError::Serialization("attester count has unexpected byte length".to_string())
    })?;
    Ok(u32::from_le_bytes(arr))
}

impl AttesterIndexStore for LmdbOracleStore {
    fn attester_at(&self, campaign: CampaignId, position: u32) -> Result<AttesterId, StoreError> {
        let key = RecordKey::IndexEntry(campaign, position).encode();
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bytes = self
            .index_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("index entry ({campaign}, {position})")))?;
        let raw = std::str::from_utf8(bytes)
            .map_err(|_| LmdbError::Serialization("index entry is not valid UTF-8".to_string()))?;
        Ok(AttesterId::new(raw))
    }

    fn attester_count(&self, campaign: CampaignId) -> Result<u32, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_count(&rtxn, campaign)?)
    }
}
