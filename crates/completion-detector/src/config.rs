use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub tick_ms: u64,
    /// Below this length the transcript is never considered stable.
    pub min_length: usize,
    /// Once reached, the shorter stability window applies.
    pub long_threshold: usize,
    pub short_stable_ticks: u32,
    pub long_stable_ticks: u32,
    pub ceiling_ms: u64,
}

impl DetectorConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn ceiling(&self) -> Duration {
        Duration::from_millis(self.ceiling_ms)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1_000,
            min_length: 300,
            long_threshold: 500,
            short_stable_ticks: 5,
            long_stable_ticks: 4,
            ceiling_ms: 30_000,
        }
    }
}
