use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;

use coordination_hub::{
    ContextEndpoint, CoordinationConfig, CoordinationError, Coordinator, InMemoryHost, Message,
    Response,
};
use scribebridge_core_types::{ContextId, Notice, Severity, WindowId};
use scribebridge_event_bus::Notifier;

const TRANSCRIPT: &str = "Name: Jane Doe, Age: 34, BP: 120/80, Chief Complaint: headache";

#[derive(Default)]
struct Toasts(Mutex<Vec<Notice>>);

#[async_trait]
impl Notifier for Toasts {
    async fn notify(&self, message: &str, severity: Severity) {
        self.0.lock().push(Notice::new(message, severity));
    }
}

impl Toasts {
    fn severities(&self) -> Vec<Severity> {
        self.0.lock().iter().map(|n| n.severity).collect()
    }
}

/// A page that answers probes and records deliveries.
#[derive(Default)]
struct Page {
    has_form: bool,
    deliver_delay: Option<Duration>,
    delivered: Mutex<Vec<String>>,
    /// Deliveries whose handling ran to the end.
    finished: AtomicUsize,
    /// When set, the page closes itself on delivery.
    close_on_delivery: Mutex<Option<(Arc<InMemoryHost>, ContextId)>>,
}

impl Page {
    fn form() -> Arc<Self> {
        Arc::new(Self {
            has_form: true,
            ..Self::default()
        })
    }

    fn deliveries(&self) -> Vec<String> {
        self.delivered.lock().clone()
    }
}

#[async_trait]
impl ContextEndpoint for Page {
    async fn handle(&self, message: Message) -> Result<Response, CoordinationError> {
        match message {
            Message::HasFormSurface => Ok(Response::FormSurface {
                has_form: self.has_form,
            }),
            Message::DeliverTranscript { transcript } => {
                self.delivered.lock().push(transcript);
                if let Some(delay) = self.deliver_delay {
                    tokio::time::sleep(delay).await;
                }
                self.finished.fetch_add(1, Ordering::SeqCst);
                let closing = self.close_on_delivery.lock().take();
                if let Some((host, id)) = closing {
                    host.close(id);
                }
                Ok(Response::Filled {
                    filled: 4,
                    skipped: 0,
                    failed: 0,
                })
            }
            other => Err(CoordinationError::NotHandled(other.kind())),
        }
    }
}

struct Fixture {
    host: Arc<InMemoryHost>,
    toasts: Arc<Toasts>,
    coordinator: Arc<Coordinator>,
}

fn fixture() -> Fixture {
    let host = InMemoryHost::new();
    let toasts = Arc::new(Toasts::default());
    let coordinator = Coordinator::new(host.clone(), toasts.clone(), CoordinationConfig::default());
    Fixture {
        host,
        toasts,
        coordinator,
    }
}

fn open(host: &Arc<InMemoryHost>, url: &str, page: Arc<Page>) -> ContextId {
    let id = host.open(WindowId(1), url);
    host.attach(id, page).unwrap();
    id
}

fn ready() -> Message {
    Message::TranscriptReady {
        transcript: TRANSCRIPT.into(),
    }
}

#[tokio::test]
async fn discovery_never_picks_the_source_or_non_web_contexts() {
    let fx = fixture();
    let source_page = Page::form();
    let internal_page = Page::form();
    let dest_page = Page::form();
    let source = open(&fx.host, "https://scribe.example/session", source_page.clone());
    open(&fx.host, "chrome://settings", internal_page.clone());
    let dest = open(&fx.host, "https://emr.example/intake", dest_page.clone());

    let reply = fx.coordinator.handle(source, ready()).await.unwrap();

    assert_eq!(reply, Response::Ack { delivered: true });
    assert_eq!(dest_page.deliveries(), vec![TRANSCRIPT.to_string()]);
    assert!(source_page.deliveries().is_empty());
    assert!(internal_page.deliveries().is_empty());
    assert_eq!(fx.host.focused(), Some(dest));
    assert_eq!(fx.host.focused_window(), Some(WindowId(1)));
    let state = fx.coordinator.state();
    assert_eq!(state.source_context_id, Some(source));
    assert_eq!(state.destination_context_id, Some(dest));
}

#[tokio::test]
async fn silent_and_formless_contexts_are_skipped() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    fx.host.open(WindowId(2), "https://news.example");
    open(&fx.host, "https://blog.example", Arc::new(Page::default()));
    let dest_page = Page::form();
    let dest = open(&fx.host, "http://localhost:3000/form", dest_page.clone());

    fx.coordinator.handle(source, ready()).await.unwrap();
    assert_eq!(fx.coordinator.state().destination_context_id, Some(dest));
    assert_eq!(dest_page.deliveries().len(), 1);
}

#[tokio::test]
async fn no_destination_is_reported_not_failed() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());

    let reply = fx.coordinator.handle(source, ready()).await.unwrap();
    assert_eq!(reply, Response::Ack { delivered: false });
    assert_eq!(fx.toasts.severities(), vec![Severity::Info]);
    assert_eq!(
        fx.coordinator.state().latest_transcript.as_deref(),
        Some(TRANSCRIPT)
    );
}

#[tokio::test(start_paused = true)]
async fn delivery_timeout_is_logged_and_focus_still_switches() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    let slow = Arc::new(Page {
        has_form: true,
        deliver_delay: Some(Duration::from_secs(60)),
        ..Page::default()
    });
    let dest = open(&fx.host, "https://emr.example", slow.clone());

    let started = tokio::time::Instant::now();
    let reply = fx.coordinator.handle(source, ready()).await.unwrap();
    let waited = started.elapsed();

    assert_eq!(reply, Response::Ack { delivered: true });
    assert!(waited >= Duration::from_secs(5) && waited < Duration::from_secs(60));
    assert_eq!(fx.host.focused(), Some(dest));
    assert!(fx.toasts.severities().is_empty());

    // The destination was not cut off when the wait gave up.
    assert_eq!(slow.finished.load(Ordering::SeqCst), 0);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(slow.finished.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn focus_failure_notifies_rejects_and_forgets_the_destination() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    fx.coordinator
        .handle(
            source,
            Message::TranscriptDetected {
                transcript: TRANSCRIPT.into(),
            },
        )
        .await
        .unwrap();

    let doomed = Page::form();
    let dest = open(&fx.host, "https://emr.example", doomed.clone());
    *doomed.close_on_delivery.lock() = Some((fx.host.clone(), dest));

    let err = fx
        .coordinator
        .handle(dest, Message::IdentifyAsDestination)
        .await
        .unwrap_err();

    assert!(matches!(err, CoordinationError::ContextGone(id) if id == dest));
    assert_eq!(fx.toasts.severities(), vec![Severity::Error]);
    assert_eq!(fx.coordinator.state().destination_context_id, None);
}

#[tokio::test]
async fn failed_known_destination_falls_back_to_discovery() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());

    let stale_page = Page::form();
    let stale = open(&fx.host, "https://old.example", stale_page.clone());
    *stale_page.close_on_delivery.lock() = Some((fx.host.clone(), stale));
    // nothing held yet, so announcing does not deliver
    assert_eq!(
        fx.coordinator
            .handle(stale, Message::IdentifyAsDestination)
            .await
            .unwrap(),
        Response::ack()
    );

    let fresh_page = Page::form();
    let fresh = open(&fx.host, "https://emr.example", fresh_page.clone());

    let reply = fx.coordinator.handle(source, ready()).await.unwrap();
    assert_eq!(reply, Response::Ack { delivered: true });
    assert_eq!(stale_page.deliveries().len(), 1);
    assert_eq!(fresh_page.deliveries().len(), 1);
    assert_eq!(fx.coordinator.state().destination_context_id, Some(fresh));
    assert_eq!(fx.host.focused(), Some(fresh));
}

#[tokio::test]
async fn short_held_transcripts_wait_for_ready() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    fx.coordinator
        .handle(
            source,
            Message::TranscriptDetected {
                transcript: "Name: J".into(),
            },
        )
        .await
        .unwrap();

    let page = Page::form();
    let dest = open(&fx.host, "https://emr.example", page.clone());
    let reply = fx
        .coordinator
        .handle(dest, Message::IdentifyAsDestination)
        .await
        .unwrap();
    assert_eq!(reply, Response::ack());
    assert!(page.deliveries().is_empty());
    assert_eq!(fx.coordinator.state().destination_context_id, Some(dest));
}

#[tokio::test]
async fn closed_contexts_are_forgotten() {
    let fx = fixture();
    let watcher = fx.coordinator.watch_closures();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    let dest = open(&fx.host, "https://emr.example", Page::form());
    fx.coordinator
        .handle(
            source,
            Message::TranscriptDetected {
                transcript: "Name: J".into(),
            },
        )
        .await
        .unwrap();
    fx.coordinator
        .handle(dest, Message::IdentifyAsDestination)
        .await
        .unwrap();

    fx.host.close(dest);
    fx.host.close(source);
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    assert_eq!(fx.coordinator.state(), Default::default());
    watcher.abort();
}

#[tokio::test]
async fn snapshots_and_rejections() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    fx.coordinator
        .handle(
            source,
            Message::TranscriptDetected {
                transcript: "Age: 34".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        fx.coordinator
            .handle(source, Message::RequestTranscript)
            .await
            .unwrap(),
        Response::Transcript {
            transcript: Some("Age: 34".into())
        }
    );
    let Response::State(snapshot) = fx.coordinator.handle(source, Message::GetState).await.unwrap()
    else {
        panic!("expected a state snapshot");
    };
    assert_eq!(snapshot.source_context_id, Some(source));
    assert_eq!(snapshot.destination_context_id, None);

    let err = fx
        .coordinator
        .handle_value(source, json!({"type": "toggle-overlay"}))
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinationError::UnknownType(_)));
    let err = fx
        .coordinator
        .handle(source, Message::HasFormSurface)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinationError::NotHandled("has-form-surface")));
}

#[tokio::test]
async fn clients_detect_an_invalidated_coordinator() {
    let fx = fixture();
    let source = open(&fx.host, "https://scribe.example", Page::form());
    let client = fx.coordinator.client(source);
    assert!(client.send(Message::GetState).await.is_ok());

    drop(fx.coordinator);
    let err = client.send(Message::GetState).await.unwrap_err();
    assert!(matches!(err, CoordinationError::Invalidated));
    assert_eq!(fx.toasts.severities(), vec![Severity::Blocking]);
    let scribe: scribebridge_core_types::ScribeError = err.into();
    assert!(scribe.is_terminal());
}
