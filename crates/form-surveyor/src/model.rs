use serde::Serialize;

use scribebridge_core_types::{ControlId, WidgetKind};

/// Raw metadata a control exposes to matching.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlMeta {
    pub name: Option<String>,
    pub dom_id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub label: String,
}

impl ControlMeta {
    /// Lower-cased, space-joined concatenation of every non-empty attribute.
    pub fn identifier(&self) -> String {
        [
            self.name.as_deref(),
            self.dom_id.as_deref(),
            self.placeholder.as_deref(),
            self.aria_label.as_deref(),
            Some(self.label.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ControlFlags {
    pub required: bool,
    pub readonly: bool,
    pub disabled: bool,
}

impl ControlFlags {
    pub fn fillable(&self) -> bool {
        !self.readonly && !self.disabled
    }
}

/// Survey-time snapshot of one fillable control. Holds a handle into the document,
/// never the control itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ControlDescriptor {
    pub control: ControlId,
    pub kind: WidgetKind,
    pub meta: ControlMeta,
    pub identifier: String,
    pub flags: ControlFlags,
}

impl ControlDescriptor {
    pub fn new(control: ControlId, kind: WidgetKind, meta: ControlMeta, flags: ControlFlags) -> Self {
        let identifier = meta.identifier();
        Self {
            control,
            kind,
            meta,
            identifier,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_skips_empty_parts() {
        let meta = ControlMeta {
            name: Some("bp".into()),
            dom_id: Some("  ".into()),
            placeholder: None,
            aria_label: Some("Blood Pressure".into()),
            label: String::new(),
        };
        assert_eq!(meta.identifier(), "bp blood pressure");
    }
}
