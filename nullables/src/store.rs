//! Nullable oracle store — thread-safe in-memory storage for testing.
//!
//! Implements every storage trait from `pulsar-store` over Mutex-guarded
//! maps, including expiry tracking, so engine tests can assert that write
//! paths extend retention horizons without touching a real database.

use pulsar_store::{
    Attestation, AttestationStore, AttesterIndexStore, ConsensusStore, ExpiryStore,
    OracleConsensus, OracleStore, RecordKey, StoreError,
};
use pulsar_types::{AttesterId, CampaignId, Timestamp};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory oracle store for testing.
pub struct NullOracleStore {
    attestations: Mutex<HashMap<(u64, AttesterId), Attestation>>,
    index: Mutex<HashMap<(u64, u32), AttesterId>>,
    counts: Mutex<HashMap<u64, u32>>,
    consensus: Mutex<HashMap<u64, OracleConsensus>>,
    /// Encoded record key → expiry horizon (epoch seconds).
    expiries: Mutex<HashMap<Vec<u8>, u64>>,
    retention_secs: u64,
}

impl NullOracleStore {
    pub fn new(retention_secs: u64) -> Self {
        Self {
            attestations: Mutex::new(HashMap::new()),
            index: Mutex::new(HashMap::new()),
            counts: Mutex::new(HashMap::new()),
            consensus: Mutex::new(HashMap::new()),
            expiries: Mutex::new(HashMap::new()),
            retention_secs,
        }
    }

    /// The expiry horizon currently recorded for a key, if any.
    pub fn expiry_of(&self, key: &RecordKey<'_>) -> Option<Timestamp> {
        self.expiries
            .lock()
            .unwrap()
            .get(&key.encode())
            .map(|secs| Timestamp::new(*secs))
    }

    /// Delete every record whose expiry horizon has lapsed at `now`.
    /// Returns the number of records removed.
    pub fn purge_expired(&self, now: Timestamp) -> usize {
        let mut expiries = self.expiries.lock().unwrap();
        let lapsed: Vec<Vec<u8>> = expiries
            .iter()
            .filter(|(_, expires_at)| **expires_at <= now.as_secs())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &lapsed {
            expiries.remove(key);
            let campaign = u64::from_be_bytes(key[1..9].try_into().expect("checked length"));
            match key[0] {
                RecordKey::TAG_ATTESTATION => {
                    let attester = AttesterId::new(String::from_utf8_lossy(&key[9..]).into_owned());
                    self.attestations.lock().unwrap().remove(&(campaign, attester));
                }
                RecordKey::TAG_INDEX_ENTRY => {
                    let position = u32::from_be_bytes(key[9..13].try_into().expect("checked length"));
                    self.index.lock().unwrap().remove(&(campaign, position));
                }
                RecordKey::TAG_ATTESTER_COUNT => {
                    self.counts.lock().unwrap().remove(&campaign);
                }
                RecordKey::TAG_CONSENSUS => {
                    self.consensus.lock().unwrap().remove(&campaign);
                }
                _ => {}
            }
        }
        lapsed.len()
    }

    /// Raise the key's horizon to `now + retention`, never lowering it.
    fn bump_horizon(&self, key: RecordKey<'_>, now: Timestamp) {
        let horizon = now.plus(self.retention_secs).as_secs();
        let mut expiries = self.expiries.lock().unwrap();
        let entry = expiries.entry(key.encode()).or_insert(0);
        if horizon > *entry {
            *entry = horizon;
        }
    }
}

impl Default for NullOracleStore {
    fn default() -> Self {
        Self::new(pulsar_types::params::DEFAULT_RETENTION_SECS)
    }
}

impl AttestationStore for NullOracleStore {
    fn record_submission(&self, attestation: &Attestation) -> Result<u32, StoreError> {
        let campaign = attestation.campaign_id;
        let now = attestation.submitted_at;
        let mut attestations = self.attestations.lock().unwrap();
        let pair = (campaign.as_u64(), attestation.attester.clone());

        let count = if attestations.contains_key(&pair) {
            *self.counts.lock().unwrap().get(&campaign.as_u64()).unwrap_or(&0)
        } else {
            let mut counts = self.counts.lock().unwrap();
            let count = counts.entry(campaign.as_u64()).or_insert(0);
            self.index
                .lock()
                .unwrap()
                .insert((campaign.as_u64(), *count), attestation.attester.clone());
            self.bump_horizon(RecordKey::IndexEntry(campaign, *count), now);
            self.bump_horizon(RecordKey::AttesterCount(campaign), now);
            *count += 1;
            *count
        };

        attestations.insert(pair, attestation.clone());
        self.bump_horizon(RecordKey::Attestation(campaign, &attestation.attester), now);
        Ok(count)
    }

    fn get_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<Option<Attestation>, StoreError> {
        Ok(self
            .attestations
            .lock()
            .unwrap()
            .get(&(campaign.as_u64(), attester.clone()))
            .cloned())
    }

    fn has_attestation(
        &self,
        campaign: CampaignId,
        attester: &AttesterId,
    ) -> Result<bool, StoreError> {
        Ok(self
            .attestations
            .lock()
            .unwrap()
            .contains_key(&(campaign.as_u64(), attester.clone())))
    }
}

impl AttesterIndexStore for NullOracleStore {
    fn attester_at(&self, campaign: CampaignId, position: u32) -> Result<AttesterId, StoreError> {
        self.index
            .lock()
            .unwrap()
            .get(&(campaign.as_u64(), position))
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "index entry ({campaign}, {position})"
                ))
            })
    }

    fn attester_count(&self, campaign: CampaignId) -> Result<u32, StoreError> {
        Ok(*self
            .counts
            .lock()
            .unwrap()
            .get(&campaign.as_u64())
            .unwrap_or(&0))
    }
}

impl ConsensusStore for NullOracleStore {
    fn put_consensus(&self, consensus: &OracleConsensus) -> Result<(), StoreError> {
        self.consensus
            .lock()
            .unwrap()
            .insert(consensus.campaign_id.as_u64(), consensus.clone());
        Ok(())
    }

    fn get_consensus(
        &self,
        campaign: CampaignId,
    ) -> Result<Option<OracleConsensus>, StoreError> {
        Ok(self
            .consensus
            .lock()
            .unwrap()
            .get(&campaign.as_u64())
            .cloned())
    }
}

impl ExpiryStore for NullOracleStore {
    fn extend_expiry(&self, key: RecordKey<'_>, now: Timestamp) -> Result<(), StoreError> {
        self.bump_horizon(key, now);
        Ok(())
    }
}

impl OracleStore for NullOracleStore {
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
