use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the ScribeBridge crates.
#[derive(Debug, Error, Clone)]
pub enum ScribeError {
    #[error("{message}")]
    Message { message: String },
    #[error("context {context} unreachable: {message}")]
    ContextUnreachable { context: ContextId, message: String },
    #[error("coordinator invalidated: {message}")]
    CoordinatorInvalidated { message: String },
}

impl ScribeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn unreachable(context: ContextId, message: impl Into<String>) -> Self {
        Self::ContextUnreachable {
            context,
            message: message.into(),
        }
    }

    pub fn invalidated(message: impl Into<String>) -> Self {
        Self::CoordinatorInvalidated {
            message: message.into(),
        }
    }

    /// Terminal errors end the current operation and need a manual retry.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScribeError::ContextUnreachable { .. } | ScribeError::CoordinatorInvalidated { .. }
        )
    }
}

/// Identity of one browsing context (a tab).
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// Identity of the window hosting a context.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct WindowId(pub u64);

/// Handle to one control inside a document. Never a copy of the control.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control-{}", self.0)
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
/// Correlates the log lines of one pipeline run.
pub struct RunId(pub String);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Widget kind of a form control.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WidgetKind {
    Text,
    Textarea,
    Email,
    Tel,
    Number,
    Date,
    Select,
    Radio,
    Checkbox,
    Submit,
    Button,
    Reset,
    Image,
    Hidden,
    Other,
}

impl WidgetKind {
    /// Parses an element type attribute (or tag name for textarea/select).
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "search" | "url" | "password" => WidgetKind::Text,
            "textarea" => WidgetKind::Textarea,
            "email" => WidgetKind::Email,
            "tel" => WidgetKind::Tel,
            "number" => WidgetKind::Number,
            "date" | "datetime-local" => WidgetKind::Date,
            "select" | "select-one" | "select-multiple" => WidgetKind::Select,
            "radio" => WidgetKind::Radio,
            "checkbox" => WidgetKind::Checkbox,
            "submit" => WidgetKind::Submit,
            "button" => WidgetKind::Button,
            "reset" => WidgetKind::Reset,
            "image" => WidgetKind::Image,
            "hidden" => WidgetKind::Hidden,
            _ => WidgetKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Text => "text",
            WidgetKind::Textarea => "textarea",
            WidgetKind::Email => "email",
            WidgetKind::Tel => "tel",
            WidgetKind::Number => "number",
            WidgetKind::Date => "date",
            WidgetKind::Select => "select",
            WidgetKind::Radio => "radio",
            WidgetKind::Checkbox => "checkbox",
            WidgetKind::Submit => "submit",
            WidgetKind::Button => "button",
            WidgetKind::Reset => "reset",
            WidgetKind::Image => "image",
            WidgetKind::Hidden => "hidden",
            WidgetKind::Other => "other",
        }
    }

    /// Pure action controls carry no data and are never filled.
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            WidgetKind::Submit
                | WidgetKind::Button
                | WidgetKind::Reset
                | WidgetKind::Image
                | WidgetKind::Hidden
        )
    }

    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            WidgetKind::Text
                | WidgetKind::Textarea
                | WidgetKind::Email
                | WidgetKind::Tel
                | WidgetKind::Number
                | WidgetKind::Date
                | WidgetKind::Other
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    Info,
    Success,
    Error,
    /// Requires the user to act before anything else can proceed.
    Blocking,
}

/// A user-visible toast.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}
