//! Requested capabilities, in pipeline order.

use serde::{Deserialize, Serialize};

use super::CapabilityType;

/// A caller's request for a capability type to be included in a queue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specification {
    #[serde(rename = "type")]
    pub capability: CapabilityType,
}

impl Specification {
    pub fn new(capability: &str) -> Self {
        Self {
            capability: CapabilityType::new(capability),
        }
    }

    /// Build an ordered specification list from capability names.
    pub fn list<S: AsRef<str>>(capabilities: &[S]) -> Vec<Self> {
        capabilities.iter().map(|c| Self::new(c.as_ref())).collect()
    }
}

impl std::fmt::Display for Specification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.capability)
    }
}
