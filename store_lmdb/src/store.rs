//! The LMDB oracle store — environment, database handles, and maintenance.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env};
use tracing::debug;

use pulsar_store::{OracleStore, RecordKey, StoreError};
use pulsar_types::{OracleParams, Timestamp};

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

const MAX_DBS: u32 = 5;
const DEFAULT_MAP_SIZE: usize = 256 * 1024 * 1024;

/// LMDB-backed implementation of every oracle storage trait.
///
/// Data databases are keyed by the canonical `RecordKey` encoding, so the
/// `expiry` database (encoded key → big-endian horizon) can locate the data
/// record for any lapsed entry from the key alone.
pub struct LmdbOracleStore {
    pub(crate) env: Arc<Env>,
    pub(crate) attestations_db: Database<Bytes, Bytes>,
    pub(crate) index_db: Database<Bytes, Bytes>,
    pub(crate) counts_db: Database<Bytes, Bytes>,
    pub(crate) consensus_db: Database<Bytes, Bytes>,
    pub(crate) expiry_db: Database<Bytes, Bytes>,
    pub(crate) retention_secs: u64,
}

impl LmdbOracleStore {
    /// Open or create the oracle store at `path`.
    pub fn open(path: &Path, params: &OracleParams) -> Result<Self, LmdbError> {
        Self::open_with_map_size(path, params, DEFAULT_MAP_SIZE)
    }

    pub fn open_with_map_size(
        path: &Path,
        params: &OracleParams,
        map_size: usize,
    ) -> Result<Self, LmdbError> {
        let environment = LmdbEnvironment::open(path, MAX_DBS, map_size)?;
        let env = environment.env();

        let mut wtxn = env.write_txn()?;
        let attestations_db = env.create_database(&mut wtxn, Some("attestations"))?;
        let index_db = env.create_database(&mut wtxn, Some("attester_index"))?;
        let counts_db = env.create_database(&mut wtxn, Some("attester_counts"))?;
        let consensus_db = env.create_database(&mut wtxn, Some("consensus"))?;
        let expiry_db = env.create_database(&mut wtxn, Some("expiry"))?;
        wtxn.commit()?;

        Ok(Self {
            env,
            attestations_db,
            index_db,
            counts_db,
            consensus_db,
            expiry_db,
            retention_secs: params.retention_secs,
        })
    }

    /// Read a campaign's attester count within an open transaction.
    pub(crate) fn read_count(
        &self,
        rtxn: &heed::RoTxn,
        campaign: pulsar_types::CampaignId,
    ) -> Result<u32, LmdbError> {
        match self.counts_db.get(rtxn, &crate::index::count_key(campaign))? {
            Some(bytes) => crate::index::decode_count(bytes),
            None => Ok(0),
        }
    }

    /// Raise a record's expiry horizon to `now + retention` within an open
    /// write transaction, never lowering it.
    pub(crate) fn bump_horizon(
        &self,
        wtxn: &mut heed::RwTxn,
        key: &[u8],
        now: Timestamp,
    ) -> Result<(), LmdbError> {
        let horizon = now.plus(self.retention_secs).as_secs();
        let current = match self.expiry_db.get(wtxn, key)? {
            Some(bytes) if bytes.len() == 8 => {
                let arr: [u8; 8] = bytes.try_into().expect("checked length");
                u64::from_be_bytes(arr)
            }
            Some(_) => {
                return Err(LmdbError::Serialization(
                    "expiry horizon has unexpected byte length".to_string(),
                ))
            }
            None => 0,
        };
        if horizon > current {
            self.expiry_db.put(wtxn, key, &horizon.to_be_bytes())?;
        }
        Ok(())
    }

    /// The expiry horizon currently recorded for a key, if any.
    pub fn expiry_of(&self, key: &RecordKey<'_>) -> Result<Option<Timestamp>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .expiry_db
            .get(&rtxn, &key.encode())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) if bytes.len() == 8 => {
                let arr: [u8; 8] = bytes.try_into().expect("checked length");
                Ok(Some(Timestamp::new(u64::from_be_bytes(arr))))
            }
            Some(_) => Err(LmdbError::Serialization(
                "expiry horizon has unexpected byte length".to_string(),
            ))?,
            None => Ok(None),
        }
    }

    /// Delete every record whose retention horizon has lapsed at `now`.
    ///
    /// Explicit maintenance, not a background sweep: callers decide when to
    /// run it. Returns the number of records removed.
    pub fn purge_expired(&self, now: Timestamp) -> Result<usize, StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;

        let mut lapsed: Vec<Vec<u8>> = Vec::new();
        {
            let iter = self.expiry_db.iter(&wtxn).map_err(LmdbError::from)?;
            for entry in iter {
                let (key, val) = entry.map_err(LmdbError::from)?;
                if val.len() != 8 {
                    return Err(StoreError::Serialization(
                        "expiry horizon has unexpected byte length".to_string(),
                    ));
                }
                let arr: [u8; 8] = val.try_into().expect("checked length");
                if u64::from_be_bytes(arr) <= now.as_secs() {
                    lapsed.push(key.to_vec());
                }
            }
        }

        for key in &lapsed {
            let db = match key[0] {
                RecordKey::TAG_ATTESTATION => &self.attestations_db,
                RecordKey::TAG_INDEX_ENTRY => &self.index_db,
                RecordKey::TAG_ATTESTER_COUNT => &self.counts_db,
                RecordKey::TAG_CONSENSUS => &self.consensus_db,
                tag => {
                    return Err(StoreError::Corruption(format!(
                        "unknown record tag {tag} in expiry index"
                    )))
                }
            };
            db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
            self.expiry_db.delete(&mut wtxn, key).map_err(LmdbError::from)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;

        if !lapsed.is_empty() {
            debug!(purged = lapsed.len(), at = %now, "purged expired oracle records");
        }
        Ok(lapsed.len())
    }
}

impl OracleStore for LmdbOracleStore {
    type Attestations = Self;
    type Index = Self;
    type Consensus = Self;
    type Expiry = Self;

    fn attestations(&self) -> &Self {
        self
    }

    fn attester_index(&self) -> &Self {
        self
    }

    fn consensus(&self) -> &Self {
        self
    }

    fn expiry(&self) -> &Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulsar_store::{
        Attestation, AttestationStore, AttesterIndexStore, ConsensusStore, ExpiryStore,
        OracleConsensus,
    };
    use pulsar_types::{AttesterId, CampaignId, Measurement};

    fn open_store(dir: &Path) -> LmdbOracleStore {
        let params = OracleParams {
            min_attesters: 2,
            retention_secs: 1000,
        };
        LmdbOracleStore::open_with_map_size(dir, &params, 10 * 1024 * 1024).unwrap()
    }

    fn attestation(campaign: u64, name: &str, impressions: u64, at: u64) -> Attestation {
        Attestation {
            campaign_id: CampaignId::new(campaign),
            attester: AttesterId::new(name),
            measurement: Measurement {
                impressions_verified: impressions,
                clicks_verified: impressions / 10,
                fraud_rate_bps: 100,
                quality_score: 90,
            },
            submitted_at: Timestamp::new(at),
        }
    }

    #[test]
    fn attestation_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(1);
        let a = attestation(1, "acct_alice", 500, 1000);

        assert!(!store.has_attestation(campaign, &a.attester).unwrap());
        assert_eq!(store.record_submission(&a).unwrap(), 1);
        assert!(store.has_attestation(campaign, &a.attester).unwrap());
        assert_eq!(
            store.get_attestation(campaign, &a.attester).unwrap(),
            Some(a.clone())
        );

        // A resubmission replaces the record whole and keeps the count.
        let updated = attestation(1, "acct_alice", 900, 1500);
        assert_eq!(store.record_submission(&updated).unwrap(), 1);
        assert_eq!(
            store.get_attestation(campaign, &a.attester).unwrap(),
            Some(updated)
        );
    }

    #[test]
    fn index_is_append_only_and_contiguous() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(7);

        assert_eq!(store.attester_count(campaign).unwrap(), 0);
        assert_eq!(
            store.record_submission(&attestation(7, "acct_a", 100, 10)).unwrap(),
            1
        );
        assert_eq!(
            store.record_submission(&attestation(7, "acct_b", 200, 20)).unwrap(),
            2
        );

        assert_eq!(store.attester_at(campaign, 0).unwrap(), AttesterId::new("acct_a"));
        assert_eq!(store.attester_at(campaign, 1).unwrap(), AttesterId::new("acct_b"));
        assert!(store.attester_at(campaign, 2).is_err());
        assert_eq!(store.attester_count(campaign).unwrap(), 2);
    }

    #[test]
    fn submission_stamps_every_record_in_one_commit() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(1);
        let a = attestation(1, "acct_alice", 500, 100);
        store.record_submission(&a).unwrap();

        // Retention is 1000s in these tests.
        let horizon = Some(Timestamp::new(1100));
        assert_eq!(
            store.expiry_of(&RecordKey::Attestation(campaign, &a.attester)).unwrap(),
            horizon
        );
        assert_eq!(store.expiry_of(&RecordKey::IndexEntry(campaign, 0)).unwrap(), horizon);
        assert_eq!(store.expiry_of(&RecordKey::AttesterCount(campaign)).unwrap(), horizon);

        // A resubmission pushes only the attestation's horizon forward.
        let later = attestation(1, "acct_alice", 600, 400);
        store.record_submission(&later).unwrap();
        assert_eq!(
            store.expiry_of(&RecordKey::Attestation(campaign, &a.attester)).unwrap(),
            Some(Timestamp::new(1400))
        );
        assert_eq!(store.expiry_of(&RecordKey::IndexEntry(campaign, 0)).unwrap(), horizon);
    }

    #[test]
    fn consensus_record_is_replaced_whole() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(3);

        assert_eq!(store.get_consensus(campaign).unwrap(), None);

        let first = OracleConsensus {
            campaign_id: campaign,
            total_attesters: 2,
            avg_impressions: 1500,
            avg_clicks: 150,
            avg_fraud_rate_bps: 1500,
            avg_quality_score: 85,
            consensus_reached: true,
            last_updated: Timestamp::new(10),
        };
        store.put_consensus(&first).unwrap();
        assert_eq!(store.get_consensus(campaign).unwrap(), Some(first.clone()));

        let second = OracleConsensus {
            total_attesters: 3,
            avg_impressions: 4000,
            last_updated: Timestamp::new(20),
            ..first
        };
        store.put_consensus(&second).unwrap();
        assert_eq!(store.get_consensus(campaign).unwrap(), Some(second));
    }

    #[test]
    fn expiry_extends_and_never_shortens() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(1);
        let key = RecordKey::Consensus(campaign);

        assert_eq!(store.expiry_of(&key).unwrap(), None);
        store.extend_expiry(RecordKey::Consensus(campaign), Timestamp::new(500)).unwrap();
        assert_eq!(store.expiry_of(&key).unwrap(), Some(Timestamp::new(1500)));

        // An extension stamped with an earlier clock must not move the
        // horizon backwards.
        store.extend_expiry(RecordKey::Consensus(campaign), Timestamp::new(100)).unwrap();
        assert_eq!(store.expiry_of(&key).unwrap(), Some(Timestamp::new(1500)));

        store.extend_expiry(RecordKey::Consensus(campaign), Timestamp::new(900)).unwrap();
        assert_eq!(store.expiry_of(&key).unwrap(), Some(Timestamp::new(1900)));
    }

    #[test]
    fn purge_drops_only_lapsed_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(dir.path());
        let campaign = CampaignId::new(1);

        let old = attestation(1, "acct_old", 100, 100);
        store.record_submission(&old).unwrap();

        let fresh = attestation(1, "acct_fresh", 200, 5000);
        store.record_submission(&fresh).unwrap();

        // Old's attestation and index entry lapse at 1100; fresh's records,
        // and the count its submission re-stamped, live until 6000.
        let purged = store.purge_expired(Timestamp::new(2000)).unwrap();
        assert_eq!(purged, 2);
        assert!(!store.has_attestation(campaign, &old.attester).unwrap());
        assert!(store.has_attestation(campaign, &fresh.attester).unwrap());
        assert_eq!(
            store
                .expiry_of(&RecordKey::Attestation(campaign, &old.attester))
                .unwrap(),
            None
        );
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let campaign = CampaignId::new(1);
        let a = attestation(1, "acct_alice", 500, 1000);
        {
            let store = open_store(dir.path());
            store.record_submission(&a).unwrap();
        }

        let reopened = open_store(dir.path());
        assert_eq!(
            reopened.get_attestation(campaign, &a.attester).unwrap(),
            Some(a)
        );
        assert_eq!(reopened.attester_count(campaign).unwrap(), 1);
    }
}
