use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use scribebridge_core_types::{ContextId, Severity};
use scribebridge_event_bus::Notifier;

use crate::config::CoordinationConfig;
use crate::errors::CoordinationError;
use crate::host::{ContextEvent, ContextHost};
use crate::message::{Message, Response, StateSnapshot};

/// Who said what, and where it should go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscriptState {
    pub latest_transcript: Option<String>,
    pub source_context_id: Option<ContextId>,
    pub destination_context_id: Option<ContextId>,
}

impl TranscriptState {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            latest_transcript: self.latest_transcript.clone(),
            source_context_id: self.source_context_id,
            destination_context_id: self.destination_context_id,
        }
    }
}

/// The one authority over [`TranscriptState`]. Create it at startup and hand out
/// `Arc` handles; nothing else mutates the state.
pub struct Coordinator {
    host: Arc<dyn ContextHost>,
    notifier: Arc<dyn Notifier>,
    config: CoordinationConfig,
    state: Mutex<TranscriptState>,
}

impl Coordinator {
    pub fn new(
        host: Arc<dyn ContextHost>,
        notifier: Arc<dyn Notifier>,
        config: CoordinationConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            notifier,
            config,
            state: Mutex::new(TranscriptState::default()),
        })
    }

    pub fn state(&self) -> TranscriptState {
        self.state.lock().clone()
    }

    /// Handle for code running inside `context`.
    pub fn client(self: &Arc<Self>, context: ContextId) -> CoordinatorClient {
        CoordinatorClient {
            coordinator: Arc::downgrade(self),
            context,
            notifier: Arc::clone(&self.notifier),
        }
    }

    /// Clears tracked ids as their contexts close, until the host stops publishing.
    pub fn watch_closures(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.host.subscribe();
        let coordinator = Arc::downgrade(self);
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(ContextEvent::Closed(context)) => match coordinator.upgrade() {
                        Some(coordinator) => coordinator.on_context_closed(context),
                        None => break,
                    },
                    Ok(ContextEvent::Opened(_)) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "context events lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    pub fn on_context_closed(&self, context: ContextId) {
        let mut state = self.state.lock();
        if state.source_context_id == Some(context) {
            debug!(%context, "source context closed");
            state.source_context_id = None;
            state.latest_transcript = None;
        }
        if state.destination_context_id == Some(context) {
            debug!(%context, "destination context closed");
            state.destination_context_id = None;
        }
    }

    /// Decodes a raw message first; unknown types are rejected explicitly.
    pub async fn handle_value(
        &self,
        sender: ContextId,
        raw: Value,
    ) -> Result<Response, CoordinationError> {
        let message = Message::from_value(raw)?;
        self.handle(sender, message).await
    }

    #[instrument(skip_all, fields(%sender, kind = message.kind()))]
    pub async fn handle(
        &self,
        sender: ContextId,
        message: Message,
    ) -> Result<Response, CoordinationError> {
        match message {
            Message::TranscriptDetected { transcript } => {
                let mut state = self.state.lock();
                state.latest_transcript = Some(transcript);
                state.source_context_id = Some(sender);
                Ok(Response::ack())
            }
            Message::TranscriptReady { transcript } => {
                {
                    let mut state = self.state.lock();
                    state.latest_transcript = Some(transcript.clone());
                    state.source_context_id = Some(sender);
                }
                self.route(transcript).await
            }
            Message::IdentifyAsDestination => {
                let held = {
                    let mut state = self.state.lock();
                    state.destination_context_id = Some(sender);
                    state.latest_transcript.clone()
                };
                info!(destination = %sender, "destination registered");
                match held {
                    Some(transcript)
                        if transcript.chars().count() >= self.config.min_deliverable_chars =>
                    {
                        self.deliver(sender, &transcript).await?;
                        Ok(Response::Ack { delivered: true })
                    }
                    _ => Ok(Response::ack()),
                }
            }
            Message::RequestTranscript => {
                let transcript = self.state.lock().latest_transcript.clone();
                Ok(Response::Transcript { transcript })
            }
            Message::GetState => {
                let snapshot = self.state.lock().snapshot();
                Ok(Response::State(snapshot))
            }
            other => Err(CoordinationError::NotHandled(other.kind())),
        }
    }

    /// Known destination first; when that fails, forget it and discover another.
    async fn route(&self, transcript: String) -> Result<Response, CoordinationError> {
        let known = self.state.lock().destination_context_id;
        if let Some(destination) = known {
            match self.deliver(destination, &transcript).await {
                Ok(()) => return Ok(Response::Ack { delivered: true }),
                Err(err) => {
                    warn!(%destination, error = %err, "known destination failed, rediscovering");
                }
            }
        }

        let Some(destination) = self.discover().await? else {
            self.notifier
                .notify(
                    "No open form found. Open the destination form and it will be filled.",
                    Severity::Info,
                )
                .await;
            return Ok(Response::ack());
        };
        self.state.lock().destination_context_id = Some(destination);
        self.deliver(destination, &transcript).await?;
        Ok(Response::Ack { delivered: true })
    }

    /// First web context, other than the source, that reports a form surface.
    #[instrument(skip_all)]
    pub async fn discover(&self) -> Result<Option<ContextId>, CoordinationError> {
        let source = self.state.lock().source_context_id;
        for context in self.host.contexts().await? {
            if Some(context.id) == source || !context.is_web() {
                continue;
            }
            match self.host.send(context.id, Message::HasFormSurface).await {
                Ok(Response::FormSurface { has_form: true }) => {
                    info!(destination = %context.id, url = %context.url, "destination discovered");
                    return Ok(Some(context.id));
                }
                Ok(_) => debug!(context = %context.id, "no form surface"),
                Err(err) => debug!(context = %context.id, error = %err, "probe failed"),
            }
        }
        Ok(None)
    }

    /// Sends the transcript (bounded wait for the acknowledgement; a slow destination
    /// finishes in the background, failures are only logged), then brings the
    /// destination to the front. A failed focus is fatal: the user is told, the
    /// destination forgotten and the error returned.
    #[instrument(skip_all, fields(%destination))]
    pub async fn deliver(
        &self,
        destination: ContextId,
        transcript: &str,
    ) -> Result<(), CoordinationError> {
        let message = Message::DeliverTranscript {
            transcript: transcript.to_string(),
        };
        // The destination keeps working on its own task; only the wait is bounded.
        let host = Arc::clone(&self.host);
        let send = tokio::spawn(async move { host.send(destination, message).await });
        let timeout = self.config.delivery_timeout();
        match tokio::time::timeout(timeout, send).await {
            Ok(Ok(Ok(response))) => debug!(?response, "delivery acknowledged"),
            Ok(Ok(Err(err))) => warn!(error = %err, "delivery send failed"),
            Ok(Err(err)) => warn!(error = %err, "delivery task aborted"),
            Err(_) => {
                let err = CoordinationError::Timeout {
                    context: destination,
                    after_ms: self.config.delivery_timeout_ms,
                };
                warn!(error = %err, "delivery not acknowledged in time");
            }
        }

        if let Err(err) = self.focus(destination).await {
            {
                let mut state = self.state.lock();
                if state.destination_context_id == Some(destination) {
                    state.destination_context_id = None;
                }
            }
            self.notifier
                .notify(
                    &format!("Could not switch to the destination form: {err}"),
                    Severity::Error,
                )
                .await;
            return Err(err);
        }
        Ok(())
    }

    async fn focus(&self, destination: ContextId) -> Result<(), CoordinationError> {
        let info = self
            .host
            .contexts()
            .await?
            .into_iter()
            .find(|info| info.id == destination)
            .ok_or(CoordinationError::ContextGone(destination))?;
        self.host.focus_window(info.window).await?;
        self.host.activate(destination).await
    }
}

/// A context's way of talking to the coordinator. Once the coordinator is gone
/// (for instance after a reload) every send fails and the user is asked to act.
#[derive(Clone)]
pub struct CoordinatorClient {
    coordinator: Weak<Coordinator>,
    context: ContextId,
    notifier: Arc<dyn Notifier>,
}

impl CoordinatorClient {
    pub fn context(&self) -> ContextId {
        self.context
    }

    pub async fn send(&self, message: Message) -> Result<Response, CoordinationError> {
        let Some(coordinator) = self.coordinator.upgrade() else {
            self.notifier
                .notify(
                    "The dictation bridge was reloaded. Refresh this page to reconnect.",
                    Severity::Blocking,
                )
                .await;
            return Err(CoordinationError::Invalidated);
        };
        coordinator.handle(self.context, message).await
    }
}
