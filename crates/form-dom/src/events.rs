use serde::{Deserialize, Serialize};

use scribebridge_core_types::ControlId;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Input,
    Change,
    Blur,
    Focus,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Blur => "blur",
            EventKind::Focus => "focus",
        }
    }
}

/// A synthesized event as observed by the document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DomEvent {
    pub target: ControlId,
    pub kind: EventKind,
    pub bubbles: bool,
}

impl DomEvent {
    pub fn bubbling(target: ControlId, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            bubbles: true,
        }
    }
}
