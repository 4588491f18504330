//! Attester identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An attester identity — an opaque account or public-key handle.
///
/// Identities are issued and authorized by the external identity registry;
/// this core never interprets the contents, it only uses them as keys and
/// checks authorization through the `AttesterRegistry` boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttesterId(String);

impl AttesterId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AttesterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AttesterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
