use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinationConfig {
    /// Upper bound on waiting for the destination to acknowledge a delivery.
    pub delivery_timeout_ms: u64,
    /// A destination announcing itself only triggers delivery for transcripts at
    /// least this long.
    pub min_deliverable_chars: usize,
}

impl CoordinationConfig {
    pub fn delivery_timeout(&self) -> Duration {
        Duration::from_millis(self.delivery_timeout_ms)
    }
}

impl Default for CoordinationConfig {
    fn default() -> Self {
        Self {
            delivery_timeout_ms: 5_000,
            min_deliverable_chars: 20,
        }
    }
}
