use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPolicy {
    /// Pause after scrolling a control into view and between consecutive fills.
    pub settle_ms: u64,
    /// How long the highlight outline stays before reverting.
    pub highlight_ms: u64,
    pub highlight_outline: String,
}

impl FillPolicy {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            highlight_ms: 1500,
            highlight_outline: "2px solid #4caf50".into(),
        }
    }
}
