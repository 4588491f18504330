//! Oracle parameters — administrator-tunable configuration values.

use serde::{Deserialize, Serialize};

/// Default quorum floor: three independent attesters.
pub const DEFAULT_MIN_ATTESTERS: u32 = 3;

/// Default retention horizon for oracle records: 30 days.
pub const DEFAULT_RETENTION_SECS: u64 = 30 * 24 * 3600;

/// Configuration for the performance oracle.
///
/// Owned by an administrator role outside this core; the engine reads
/// `min_attesters` through the `PolicyStore` boundary on every quorum check
/// so an administrator change takes effect on the next submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OracleParams {
    /// Minimum distinct attesters required before a consensus is computed.
    ///
    /// A value of 0 or 1 degenerates to "last submission wins" — legal but
    /// discouraged; the engine logs a warning and honors it.
    pub min_attesters: u32,

    /// How long a record is kept alive past its most recent write, in
    /// seconds. Every write extends the record's expiry horizon to at least
    /// `write_time + retention_secs`.
    pub retention_secs: u64,
}

impl Default for OracleParams {
    fn default() -> Self {
        Self {
            min_attesters: DEFAULT_MIN_ATTESTERS,
            retention_secs: DEFAULT_RETENTION_SECS,
        }
    }
}
