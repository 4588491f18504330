//! Campaign identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an ad campaign being measured.
///
/// Campaign lifecycle (creation, budgets, teardown) is owned by the campaign
/// management system; the oracle only keys its records by this id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CampaignId(u64);

impl CampaignId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Big-endian byte encoding, used in composite storage keys so that
    /// all records of one campaign are contiguous under a range scan.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CampaignId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
