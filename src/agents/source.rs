use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use completion_detector::{watch, DetectorConfig, StopSignal, TranscriptProbe};
use coordination_hub::{
    ContextEndpoint, CoordinationError, CoordinatorClient, Message, Response,
};
use scribebridge_core_types::{ScribeError, Severity};
use scribebridge_event_bus::Notifier;

/// The editable element the dictation application streams into.
#[derive(Debug, Default)]
pub struct LiveTranscript {
    text: Mutex<String>,
}

impl LiveTranscript {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn append(&self, chunk: &str) {
        self.text.lock().push_str(chunk);
    }

    pub fn set(&self, text: impl Into<String>) {
        *self.text.lock() = text.into();
    }

    pub fn current(&self) -> String {
        self.text.lock().clone()
    }
}

#[async_trait]
impl TranscriptProbe for LiveTranscript {
    async fn transcript(&self) -> Result<String, ScribeError> {
        Ok(self.current())
    }
}

/// Runs in the dictation application's context.
pub struct SourceAgent {
    transcript: Arc<LiveTranscript>,
    client: CoordinatorClient,
    detector: DetectorConfig,
    notifier: Arc<dyn Notifier>,
}

impl SourceAgent {
    pub fn new(
        transcript: Arc<LiveTranscript>,
        client: CoordinatorClient,
        detector: DetectorConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            transcript,
            client,
            detector,
            notifier,
        }
    }

    /// Streams the partial transcript to the coordinator. Nothing is delivered yet.
    pub async fn publish_progress(&self) -> Result<(), CoordinationError> {
        let transcript = self.transcript.current();
        if transcript.trim().is_empty() {
            return Ok(());
        }
        self.client
            .send(Message::TranscriptDetected { transcript })
            .await
            .map(|_| ())
    }

    /// Waits for the transcript to settle after `signal`, then hands it over.
    #[instrument(skip_all, fields(context = %self.client.context()))]
    pub async fn on_stop_signal(
        &self,
        signal: StopSignal,
    ) -> Result<Option<Response>, CoordinationError> {
        let Some(done) = watch(self.transcript.as_ref(), &signal, &self.detector).await else {
            return Ok(None);
        };
        let transcript = done.transcript.trim().to_string();
        if transcript.is_empty() {
            self.notifier
                .notify("Nothing was dictated.", Severity::Info)
                .await;
            return Ok(None);
        }
        debug!(reason = ?done.reason, chars = transcript.len(), "handing transcript over");
        self.client
            .send(Message::TranscriptReady { transcript })
            .await
            .map(Some)
    }
}

#[async_trait]
impl ContextEndpoint for SourceAgent {
    async fn handle(&self, message: Message) -> Result<Response, CoordinationError> {
        match message {
            Message::ExtractTranscript => {
                let text = self.transcript.current();
                Ok(Response::Transcript {
                    transcript: (!text.trim().is_empty()).then_some(text),
                })
            }
            other => Err(CoordinationError::NotHandled(other.kind())),
        }
    }
}
