use serde::{Deserialize, Serialize};

use field_extractor::FieldKey;

/// Minimum confidence a mapping has to reach.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum Thresholds {
    /// One threshold for every key.
    Flat { min: f64 },
    /// History keys are free text and get a looser bar than the structured ones.
    KeyClass { history: f64, other: f64 },
}

impl Thresholds {
    pub fn for_key(&self, key: FieldKey) -> f64 {
        match *self {
            Thresholds::Flat { min } => min,
            Thresholds::KeyClass { history, other } => {
                if key.is_history() {
                    history
                } else {
                    other
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    pub thresholds: Thresholds,
    /// A control claimed by an earlier key cannot be claimed again.
    pub exclusive: bool,
    /// Longest value a checkbox may receive.
    pub checkbox_max_chars: usize,
}

impl MatchPolicy {
    pub const PASTE_FILL_MIN: f64 = 0.3;
    pub const HISTORY_MIN: f64 = 0.6;
    pub const OTHER_MIN: f64 = 0.7;
    pub const CHECKBOX_MAX_CHARS: usize = 10;

    /// Single-context paste fill: permissive, controls may be reused.
    pub fn paste_fill() -> Self {
        Self {
            thresholds: Thresholds::Flat {
                min: Self::PASTE_FILL_MIN,
            },
            exclusive: false,
            checkbox_max_chars: Self::CHECKBOX_MAX_CHARS,
        }
    }

    /// Cross-context delivery: key-class thresholds and exclusive claims.
    pub fn cross_context() -> Self {
        Self {
            thresholds: Thresholds::KeyClass {
                history: Self::HISTORY_MIN,
                other: Self::OTHER_MIN,
            },
            exclusive: true,
            checkbox_max_chars: Self::CHECKBOX_MAX_CHARS,
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self::cross_context()
    }
}
