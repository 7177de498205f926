use serde::Serialize;

use form_dom::SelectOption;
use scribebridge_core_types::{ControlId, WidgetKind};

/// What a port reports about a control right before it is filled.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSnapshot {
    pub control: ControlId,
    pub kind: WidgetKind,
    pub name: Option<String>,
    pub value: String,
    pub checked: bool,
    pub editable: bool,
    pub options: Vec<SelectOption>,
}

/// One member of a radio group.
#[derive(Clone, Debug, PartialEq)]
pub struct RadioChoice {
    pub control: ControlId,
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FillOutcome {
    Filled,
    /// Nothing matched the value; the control was left untouched.
    Skipped(&'static str),
}

/// Tally of one `fill_all` batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub filled: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl FillReport {
    pub fn total(&self) -> usize {
        self.filled + self.skipped + self.failed
    }
}
