//! Attester registry boundary.

use pulsar_types::AttesterId;

/// Boundary to the external identity system that issues and revokes
/// attester authorizations.
///
/// The oracle calls this once per submission; it never caches the answer,
/// so a revocation takes effect on the attester's next submission.
pub trait AttesterRegistry {
    /// Whether this identity currently holds the oracle role.
    fn is_authorized(&self, attester: &AttesterId) -> bool;
}
