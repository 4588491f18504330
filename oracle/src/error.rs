use pulsar_store::StoreError;
use pulsar_types::{AttesterId, CampaignId, MeasurementError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("attester {0} is not authorized for the oracle role")]
    Unauthorized(AttesterId),

    #[error("invalid measurement: {0}")]
    InvalidMeasurement(#[from] MeasurementError),

    #[error("no attestation by {attester} for campaign {campaign}")]
    NotFound {
        campaign: CampaignId,
        attester: AttesterId,
    },

    #[error("campaign {0} has not reached consensus")]
    NotReached(CampaignId),

    #[error("aggregation overflow for campaign {0}")]
    Overflow(CampaignId),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
