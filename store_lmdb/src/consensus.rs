//! LMDB implementation of ConsensusStore.

use pulsar_store::{ConsensusStore, OracleConsensus, RecordKey, StoreError};
use pulsar_types::CampaignId;

use crate::store::LmdbOracleStore;
use crate::LmdbError;

impl ConsensusStore for LmdbOracleStore {
    fn put_consensus(&self, consensus: &OracleConsensus) -> Result<(), StoreError> {
        let key = RecordKey::Consensus(consensus.campaign_id).encode();
        let bytes = bincode::serialize(consensus).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.consensus_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_consensus(
        &self,
        campaign: CampaignId,
    ) -> Result<Option<OracleConsensus>, StoreError> {
        let key = RecordKey::Consensus(campaign).encode();
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .consensus_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?
        {
            Some(bytes) => {
                let consensus: OracleConsensus =
                    bincode::deserialize(bytes).map_err(LmdbError::from)?;
                Ok(Some(consensus))
            }
            None => Ok(None),
        }
    }
}
