//! Measurement payload submitted by an attester.
//!
//! Fraud rate is expressed in basis points (0–10000); quality score on a
//! 0–100 scale. Both bounds are part of the oracle's public contract: a
//! submission outside them is rejected before anything is written.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for `fraud_rate_bps` (100% in basis points).
pub const MAX_FRAUD_RATE_BPS: u32 = 10_000;

/// Upper bound for `quality_score`.
pub const MAX_QUALITY_SCORE: u32 = 100;

/// One attester's claim about a campaign's performance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Number of impressions the attester independently verified.
    pub impressions_verified: u64,
    /// Number of clicks the attester independently verified.
    pub clicks_verified: u64,
    /// Estimated fraudulent-traffic share, in basis points (0–10000).
    pub fraud_rate_bps: u32,
    /// Overall traffic quality score (0–100).
    pub quality_score: u32,
}

/// A measurement field outside its declared range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasurementError {
    #[error("fraud rate {0} bps exceeds maximum of {MAX_FRAUD_RATE_BPS}")]
    FraudRateOutOfRange(u32),

    #[error("quality score {0} exceeds maximum of {MAX_QUALITY_SCORE}")]
    QualityScoreOutOfRange(u32),
}

impl Measurement {
    /// Check that every bounded field is within its declared range.
    ///
    /// The counter fields are non-negative by construction, so only the
    /// two score fields need a range check.
    pub fn validate(&self) -> Result<(), MeasurementError> {
        if self.fraud_rate_bps > MAX_FRAUD_RATE_BPS {
            return Err(MeasurementError::FraudRateOutOfRange(self.fraud_rate_bps));
        }
        if self.quality_score > MAX_QUALITY_SCORE {
            return Err(MeasurementError::QualityScoreOutOfRange(self.quality_score));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Measurement {
        Measurement {
            impressions_verified: 1000,
            clicks_verified: 100,
            fraud_rate_bps: 250,
            quality_score: 85,
        }
    }

    #[test]
    fn valid_measurement_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let m = Measurement {
            fraud_rate_bps: MAX_FRAUD_RATE_BPS,
            quality_score: MAX_QUALITY_SCORE,
            ..base()
        };
        assert!(m.validate().is_ok());
    }

    #[test]
    fn fraud_rate_over_max_rejected() {
        let m = Measurement {
            fraud_rate_bps: MAX_FRAUD_RATE_BPS + 1,
            ..base()
        };
        assert_eq!(
            m.validate(),
            Err(MeasurementError::FraudRateOutOfRange(MAX_FRAUD_RATE_BPS + 1))
        );
    }

    #[test]
    fn quality_score_over_max_rejected() {
        let m = Measurement {
            quality_score: 101,
            ..base()
        };
        assert_eq!(m.validate(), Err(MeasurementError::QualityScoreOutOfRange(101)));
    }

    #[test]
    fn zero_counters_are_valid() {
        let m = Measurement {
            impressions_verified: 0,
            clicks_verified: 0,
            fraud_rate_bps: 0,
            quality_score: 0,
        };
        assert!(m.validate().is_ok());
    }
}
