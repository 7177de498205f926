use async_trait::async_trait;

use form_dom::{DomEvent, EventKind, SharedDocument};
use form_surveyor::{resolve_label, SurveyPolicy};
use scribebridge_core_types::ControlId;

use crate::errors::FillError;
use crate::model::{ControlSnapshot, RadioChoice};
use crate::ports::FillPort;

/// [`FillPort`] over an in-memory document.
#[derive(Clone)]
pub struct DocumentPort {
    document: SharedDocument,
}

impl DocumentPort {
    pub fn new(document: SharedDocument) -> Self {
        Self { document }
    }
}

#[async_trait]
impl FillPort for DocumentPort {
    async fn snapshot(&self, control: ControlId) -> Result<ControlSnapshot, FillError> {
        let document = self.document.lock();
        let found = document.control(control)?;
        Ok(ControlSnapshot {
            control,
            kind: found.kind,
            name: found.name.clone(),
            value: found.value().to_string(),
            checked: found.checked,
            editable: !found.disabled && !found.readonly,
            options: found.options.clone(),
        })
    }

    async fn scroll_into_view(&self, control: ControlId) -> Result<(), FillError> {
        Ok(self.document.lock().scroll_into_view(control)?)
    }

    async fn set_outline(
        &self,
        control: ControlId,
        outline: Option<String>,
    ) -> Result<(), FillError> {
        Ok(self.document.lock().set_outline(control, outline)?)
    }

    async fn write_value(&self, control: ControlId, value: &str) -> Result<(), FillError> {
        Ok(self.document.lock().set_native_value(control, value)?)
    }

    async fn select_option(&self, control: ControlId, index: usize) -> Result<(), FillError> {
        Ok(self.document.lock().select_option(control, index)?)
    }

    async fn set_checked(&self, control: ControlId, checked: bool) -> Result<(), FillError> {
        Ok(self.document.lock().set_checked(control, checked)?)
    }

    async fn radio_group(&self, name: &str) -> Result<Vec<RadioChoice>, FillError> {
        let document = self.document.lock();
        let policy = SurveyPolicy::default();
        let mut choices = Vec::new();
        for id in document.radio_group(name) {
            let radio = document.control(id)?;
            choices.push(RadioChoice {
                control: id,
                value: radio.value().to_string(),
                label: resolve_label(&document, radio, &policy),
            });
        }
        Ok(choices)
    }

    async fn dispatch(&self, control: ControlId, kind: EventKind) -> Result<(), FillError> {
        Ok(self
            .document
            .lock()
            .dispatch(DomEvent::bubbling(control, kind))?)
    }
}
