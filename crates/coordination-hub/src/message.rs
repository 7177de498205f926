use serde::{Deserialize, Serialize};
use serde_json::Value;

use scribebridge_core_types::ContextId;

use crate::errors::CoordinationError;

/// Every message understood on the cross-context bus, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Message {
    /// A partial transcript while dictation is still running.
    TranscriptDetected { transcript: String },
    /// The final transcript.
    TranscriptReady { transcript: String },
    IdentifyAsDestination,
    RequestTranscript,
    GetState,
    DeliverTranscript { transcript: String },
    ExtractTranscript,
    HasFormSurface,
}

impl Message {
    pub const TYPES: [&'static str; 8] = [
        "transcript-detected",
        "transcript-ready",
        "identify-as-destination",
        "request-transcript",
        "get-state",
        "deliver-transcript",
        "extract-transcript",
        "has-form-surface",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            Message::TranscriptDetected { .. } => "transcript-detected",
            Message::TranscriptReady { .. } => "transcript-ready",
            Message::IdentifyAsDestination => "identify-as-destination",
            Message::RequestTranscript => "request-transcript",
            Message::GetState => "get-state",
            Message::DeliverTranscript { .. } => "deliver-transcript",
            Message::ExtractTranscript => "extract-transcript",
            Message::HasFormSurface => "has-form-surface",
        }
    }

    /// Decodes a raw JSON message, telling an unknown `type` apart from a bad payload.
    pub fn from_value(raw: Value) -> Result<Self, CoordinationError> {
        let kind = raw
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoordinationError::Malformed("missing `type`".into()))?;
        if !Self::TYPES.contains(&kind) {
            return Err(CoordinationError::UnknownType(kind.to_string()));
        }
        Ok(serde_json::from_value(raw)?)
    }
}

/// Read-only view of the coordinator's transcript state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub latest_transcript: Option<String>,
    pub source_context_id: Option<ContextId>,
    pub destination_context_id: Option<ContextId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Response {
    Ack {
        delivered: bool,
    },
    Transcript {
        transcript: Option<String>,
    },
    State(StateSnapshot),
    FormSurface {
        #[serde(rename = "hasForm")]
        has_form: bool,
    },
    Filled {
        filled: usize,
        skipped: usize,
        failed: usize,
    },
}

impl Response {
    pub fn ack() -> Self {
        Response::Ack { delivered: false }
    }
}
