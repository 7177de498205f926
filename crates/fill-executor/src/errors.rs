use thiserror::Error;

use form_dom::DomError;
use scribebridge_core_types::{ControlId, ScribeError, WidgetKind};

#[derive(Debug, Error)]
pub enum FillError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("{control} is a {kind} control and cannot take a value")]
    Unsupported { control: ControlId, kind: WidgetKind },
    #[error("{0} is disabled or readonly")]
    NotEditable(ControlId),
}

impl From<FillError> for ScribeError {
    fn from(err: FillError) -> Self {
        ScribeError::new(err.to_string())
    }
}
