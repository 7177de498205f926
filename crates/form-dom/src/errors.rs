use thiserror::Error;

use scribebridge_core_types::{ControlId, ScribeError};

#[derive(Debug, Error, Clone)]
pub enum DomError {
    #[error("control not found: {0}")]
    ControlNotFound(ControlId),
    #[error("option index {index} out of range for {control}")]
    OptionOutOfRange { control: ControlId, index: usize },
    #[error("invalid form description: {0}")]
    InvalidSpec(String),
}

impl From<DomError> for ScribeError {
    fn from(err: DomError) -> Self {
        ScribeError::new(err.to_string())
    }
}
