//! LMDB implementation of ExpiryStore.

use pulsar_store::{ExpiryStore, RecordKey, StoreError};
use pulsar_types::Timestamp;

use crate::store::LmdbOracleStore;
use crate::LmdbError;

impl ExpiryStore for LmdbOracleStore {
    fn extend_expiry(&self, key: RecordKey<'_>, now: Timestamp) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.bump_horizon(&mut wtxn, &key.encode(), now)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
