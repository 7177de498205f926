use async_trait::async_trait;

use form_dom::EventKind;
use scribebridge_core_types::ControlId;

use crate::errors::FillError;
use crate::model::{ControlSnapshot, RadioChoice};

/// Capabilities the executor needs from a document.
///
/// `write_value` targets the widget's underlying storage, not the property wrapper a
/// framework may intercept; paired with `dispatch` it yields the observable change
/// contract reactive bindings rely on.
#[async_trait]
pub trait FillPort: Send + Sync {
    async fn snapshot(&self, control: ControlId) -> Result<ControlSnapshot, FillError>;
    async fn scroll_into_view(&self, control: ControlId) -> Result<(), FillError>;
    async fn set_outline(&self, control: ControlId, outline: Option<String>)
        -> Result<(), FillError>;
    async fn write_value(&self, control: ControlId, value: &str) -> Result<(), FillError>;
    async fn select_option(&self, control: ControlId, index: usize) -> Result<(), FillError>;
    async fn set_checked(&self, control: ControlId, checked: bool) -> Result<(), FillError>;
    async fn radio_group(&self, name: &str) -> Result<Vec<RadioChoice>, FillError>;
    /// Fires a bubbling event of `kind` at `control`.
    async fn dispatch(&self, control: ControlId, kind: EventKind) -> Result<(), FillError>;
}
