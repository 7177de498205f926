use thiserror::Error;

use scribebridge_core_types::{ContextId, ScribeError};

#[derive(Clone, Debug, Error)]
pub enum CoordinationError {
    #[error("unknown message type: {0}")]
    UnknownType(String),
    #[error("malformed message: {0}")]
    Malformed(String),
    #[error("{0} messages are not handled here")]
    NotHandled(&'static str),
    #[error("context {0} is not listening")]
    NotListening(ContextId),
    #[error("context {0} no longer exists")]
    ContextGone(ContextId),
    #[error("timed out after {after_ms}ms waiting on {context}")]
    Timeout { context: ContextId, after_ms: u64 },
    #[error("coordinator is no longer reachable")]
    Invalidated,
    #[error("{0}")]
    Remote(String),
}

impl From<CoordinationError> for ScribeError {
    fn from(err: CoordinationError) -> Self {
        match err {
            CoordinationError::NotListening(context) | CoordinationError::ContextGone(context) => {
                ScribeError::unreachable(context, err.to_string())
            }
            CoordinationError::Invalidated => ScribeError::invalidated(err.to_string()),
            other => ScribeError::new(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CoordinationError {
    fn from(err: serde_json::Error) -> Self {
        CoordinationError::Malformed(err.to_string())
    }
}
