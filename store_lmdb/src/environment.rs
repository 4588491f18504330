//! LMDB environment setup.

use crate::LmdbError;
use heed::{Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

/// Wraps the LMDB environment shared by all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(max_dbs)
                .map_size(map_size)
                .open(path)?
        };
        Ok(Self { env: Arc::new(env) })
    }

    pub fn env(&self) -> Arc<Env> {
        Arc::clone(&self.env)
    }
}
