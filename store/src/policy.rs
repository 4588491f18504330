//! Policy store boundary.

use pulsar_types::OracleParams;

/// Boundary to the administrator-owned oracle configuration.
///
/// Read on every quorum check, so a configuration change takes effect on
/// the next submission without restarting anything.
pub trait PolicyStore {
    /// Minimum distinct attesters required before consensus is computed.
    fn min_attesters(&self) -> u32;
}

/// A fixed parameter set is itself a valid policy source.
impl PolicyStore for OracleParams {
    fn min_attesters(&self) -> u32 {
        self.min_attesters
    }
}
