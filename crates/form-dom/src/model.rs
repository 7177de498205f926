use serde::{Deserialize, Serialize};

use scribebridge_core_types::{ControlId, WidgetKind};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        (self.width.max(0.0) * self.height.max(0.0)).round()
    }
}

/// Computed style subset the surveyor cares about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub display_none: bool,
    pub visibility_hidden: bool,
    pub opacity: f64,
    pub outline: Option<String>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display_none: false,
            visibility_hidden: false,
            opacity: 1.0,
            outline: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    #[serde(default)]
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            selected: false,
        }
    }
}

/// Declarative description used to populate a document.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: Option<String>,
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// External `<label for=..>` text.
    pub label: Option<String>,
    /// Text of a `<label>` wrapping the control, including any text the control renders.
    pub wrapping_label: Option<String>,
    /// Text of the immediate container, including the control's own value.
    pub container_text: Option<String>,
    pub value: String,
    pub checked: bool,
    pub required: bool,
    pub readonly: bool,
    pub disabled: bool,
    pub options: Vec<SelectOption>,
    pub geometry: Option<Geometry>,
    pub style: ComputedStyle,
    /// Attach a reactive binding that only observes changes through input events.
    pub reactive: bool,
}

impl ControlSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn wrapping_label(mut self, text: impl Into<String>) -> Self {
        self.wrapping_label = Some(text.into());
        self
    }

    pub fn container_text(mut self, text: impl Into<String>) -> Self {
        self.container_text = Some(text.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn reactive(mut self) -> Self {
        self.reactive = true;
        self
    }
}

/// One interactive element in a document.
#[derive(Clone, Debug)]
pub struct Control {
    pub id: ControlId,
    pub kind: WidgetKind,
    pub name: Option<String>,
    pub dom_id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub required: bool,
    pub readonly: bool,
    pub disabled: bool,
    pub geometry: Geometry,
    pub style: ComputedStyle,
    pub options: Vec<SelectOption>,
    pub checked: bool,
    pub in_view: bool,
    pub(crate) wrapping_label: Option<String>,
    pub(crate) container_text: Option<String>,
    /// Underlying value storage of the platform widget.
    pub(crate) value: String,
    /// Last value the framework wrapper saw; `None` when no binding is attached.
    pub(crate) tracked_value: Option<String>,
}

impl Control {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.iter().find(|opt| opt.selected)
    }
}

/// A standalone `<label for=..>` element.
#[derive(Clone, Debug)]
pub struct LabelElement {
    pub for_id: String,
    pub text: String,
}
