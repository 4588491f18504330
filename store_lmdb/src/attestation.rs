//! LMDB implementation of AttestationStore.
//!
//! `record_submission` groups every durable effect of one submission — the
//! index entry and bumped count for a first-time attester, the attestation
//! record, and the retention stamps for each — into a single LMDB write
//! transaction. A failure anywhere before the commit rolls everything back,
//! so the count can never drift from the indexed entries and a retried
//! submission can never index the same attester twice.

use pulsar_store::{Attestation, AttestationStore, RecordKey, StoreError};
use pulsar_types::{AttesterId, CampaignId};

use crate::index::count_key;
use crate::store::LmdbOracleStore;
use crate::LmdbError;

fn attestation_key(campaign: CampaignId, attester: &AttesterId) -> Vec<u8> {
    RecordKey::Attestation(campaign, attester).encode()
}

impl AttestationStore for LmdbOracleStore {
    fn record_submission(&self, attestation: &Attestation) -> Result<u32, StoreError> {
        let campaign = attestation.campaign_id;
        let key = attestation_key(campaign, &attestation.attester);
        let bytes = bincode::serialize(attestation).map_err(LmdbError::from)?;
        let now = attestation.submitted_at;

        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let is_new = self
            .attestations_db
            .get(&wtxn, &key)
            .map_err(LmdbError::from)?
            .is_none();

        let count = if is_new {
            let position = self.read_count(&wtxn, campaign)?;
            let entry_key = RecordKey::IndexEntry(campaign, position).encode();
            self.index_db
                .put(&mut wtxn, &entry_key, attestation.attester.as_str().as_bytes())
                .map_err(LmdbError::from)?;

            let new_count = position + 1;
            self.counts_db
                .put(&mut wtxn, &count_key(campaign), &new_count.to_le_bytes())
                .map_err(LmdbError::from)?;

            self.bump_horizon(&mut wtxn, &entry_key, now)?;
            self.bump_horizon(&mut wtxn, &count_key(campaign), now)?;
            new_count
        } else {
            self.read_count(&wtxn, campaign)?
        };

        self.attestations_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        self.bump_horizon(&mut wtxn, &key, now)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(count)
    }

    fn get_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<Option<Attestation>, StoreError> {
        let key = attestation_key(campaign, attester);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .attestations_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let attestation: Attestation =
                    bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(attestation))
            }
            None => Ok(None),
        }
    }

    fn has_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<bool, StoreError> {
        let key = attestation_key(campaign, attester);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let exists = self
            .attestations_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?
            .is_some();
        Ok(exists)
    }
}
