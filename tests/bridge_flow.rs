use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use tokio::time::Instant;

use completion_detector::StopSignal;
use coordination_hub::{ContextHost, Coordinator, InMemoryHost, Message, Response};
use form_dom::{shared, ControlSpec, FormDocument, SharedDocument};
use scribebridge::{BridgeConfig, DestinationAgent, LiveTranscript, SourceAgent};
use scribebridge_core_types::{ContextId, ControlId, Notice, Severity, WindowId};
use scribebridge_event_bus::Notifier;

const DICTATION: &str = "Patient name is Jane Doe. Age is 34. Gender: female. \
Blood pressure 128/82. Heart rate 76. Temperature 98.9. \
Chief complaint is intermittent headaches for two weeks, worse in the mornings. \
Past medical history of migraine in her twenties. Medications: ibuprofen as needed. \
Allergies: penicillin. Assessment: tension type headache. \
Plan: hydration, sleep hygiene and a headache diary. Follow up in four weeks.";

const LABELS: [&str; 6] = [
    "Patient Name",
    "Age",
    "Blood Pressure",
    "Presenting Complaint",
    "Allergies",
    "Plan",
];

#[derive(Default)]
struct Toasts(Mutex<Vec<Notice>>);

#[async_trait]
impl Notifier for Toasts {
    async fn notify(&self, message: &str, severity: Severity) {
        self.0.lock().push(Notice::new(message, severity));
    }
}

struct Bridge {
    host: Arc<InMemoryHost>,
    coordinator: Arc<Coordinator>,
    toasts: Arc<Toasts>,
    live: Arc<LiveTranscript>,
    source: Arc<SourceAgent>,
    source_ctx: ContextId,
    destination: Arc<DestinationAgent>,
    destination_ctx: ContextId,
    document: SharedDocument,
    controls: Vec<ControlId>,
}

/// Source page first, then a browser page, a page without a form, and the form.
fn bridge() -> Bridge {
    bridge_with(BridgeConfig::default())
}

fn bridge_with(config: BridgeConfig) -> Bridge {
    let toasts = Arc::new(Toasts::default());
    let host = InMemoryHost::new();
    let coordinator = Coordinator::new(
        host.clone(),
        toasts.clone(),
        config.coordination.delivery.clone(),
    );

    let source_ctx = host.open(WindowId(1), config.coordination.source_origin.as_str());
    host.open(WindowId(1), "chrome://settings/");
    let blog_ctx = host.open(WindowId(1), "https://blog.example.org/");
    let destination_ctx = host.open(WindowId(2), "https://ehr.example.org/encounter");

    let live = LiveTranscript::new();
    let source = Arc::new(SourceAgent::new(
        live.clone(),
        coordinator.client(source_ctx),
        config.completion.clone(),
        toasts.clone(),
    ));
    host.attach(source_ctx, source.clone()).unwrap();

    let blog = Arc::new(DestinationAgent::new(
        shared(FormDocument::new()),
        &config,
        toasts.clone(),
    ));
    host.attach(blog_ctx, blog).unwrap();

    let mut doc = FormDocument::new();
    let controls = LABELS
        .into_iter()
        .map(|label| {
            doc.add(ControlSpec::new("textarea").wrapping_label(label).reactive())
                .unwrap()
        })
        .collect();
    let document = shared(doc);
    let destination = Arc::new(DestinationAgent::new(document.clone(), &config, toasts.clone()));
    host.attach(destination_ctx, destination.clone()).unwrap();

    Bridge {
        host,
        coordinator,
        toasts,
        live,
        source,
        source_ctx,
        destination,
        destination_ctx,
        document,
        controls,
    }
}

fn assert_filled(bridge: &Bridge) {
    let doc = bridge.document.lock();
    let expected = [
        "Jane Doe",
        "34",
        "128/82",
        "intermittent headaches for two weeks, worse in the mornings",
        "penicillin",
        "hydration, sleep hygiene and a headache diary",
    ];
    for (id, value) in bridge.controls.iter().zip(expected) {
        assert_eq!(doc.control(*id).unwrap().value(), value);
        assert_eq!(doc.framework_value(*id), Some(value));
    }
}

#[tokio::test(start_paused = true)]
async fn stop_signal_fills_the_announced_form_and_focuses_it() {
    let bridge = bridge();
    let client = bridge.coordinator.client(bridge.destination_ctx);
    assert_eq!(
        bridge.destination.announce(&client).await.unwrap(),
        Some(Response::Ack { delivered: false })
    );

    bridge.live.set(DICTATION);
    let started = Instant::now();
    let response = bridge
        .source
        .on_stop_signal(StopSignal::StopPressed)
        .await
        .unwrap();

    assert_eq!(response, Some(Response::Ack { delivered: true }));
    // one tick to see the text, five more to trust it
    assert!(started.elapsed() >= Duration::from_secs(6));
    assert!(started.elapsed() < Duration::from_secs(30));
    assert_filled(&bridge);
    assert_eq!(bridge.host.focused(), Some(bridge.destination_ctx));
    assert_eq!(bridge.host.focused_window(), Some(WindowId(2)));

    let state = bridge.coordinator.state();
    assert_eq!(state.source_context_id, Some(bridge.source_ctx));
    assert_eq!(state.latest_transcript.as_deref(), Some(DICTATION));
    bridge.destination.teardown();
}

#[tokio::test(start_paused = true)]
async fn slow_fill_finishes_after_the_delivery_wait_gives_up() {
    let mut config = BridgeConfig::default();
    config.fill.settle_ms = 1_000;
    let bridge = bridge_with(config);
    let client = bridge.coordinator.client(bridge.destination_ctx);
    bridge.destination.announce(&client).await.unwrap();

    bridge.live.set(DICTATION);
    let response = bridge
        .source
        .on_stop_signal(StopSignal::StopPressed)
        .await
        .unwrap();

    assert_eq!(response, Some(Response::Ack { delivered: true }));
    assert_eq!(bridge.host.focused(), Some(bridge.destination_ctx));
    let last = bridge.controls[LABELS.len() - 1];
    assert_eq!(bridge.document.lock().control(last).unwrap().value(), "");

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_filled(&bridge);
}

#[tokio::test(start_paused = true)]
async fn unannounced_form_is_discovered_past_other_pages() {
    let bridge = bridge();
    bridge.live.set(DICTATION);

    let response = bridge
        .source
        .on_stop_signal(StopSignal::StatusText("Processing complete".into()))
        .await
        .unwrap();

    assert_eq!(response, Some(Response::Ack { delivered: true }));
    assert_eq!(
        bridge.coordinator.state().destination_context_id,
        Some(bridge.destination_ctx)
    );
    assert_filled(&bridge);
}

#[tokio::test(start_paused = true)]
async fn held_transcript_is_delivered_when_the_form_announces_itself() {
    let bridge = bridge();
    bridge.live.set(DICTATION);
    bridge.source.publish_progress().await.unwrap();
    assert!(bridge.document.lock().events().is_empty());

    let client = bridge.coordinator.client(bridge.destination_ctx);
    let response = bridge.destination.announce(&client).await.unwrap();

    assert_eq!(response, Some(Response::Ack { delivered: true }));
    assert_filled(&bridge);
    assert_eq!(bridge.host.focused(), Some(bridge.destination_ctx));
}

#[tokio::test(start_paused = true)]
async fn silent_dictation_ends_at_the_ceiling() {
    let bridge = bridge();
    let started = Instant::now();

    let response = bridge
        .source
        .on_stop_signal(StopSignal::StopPressed)
        .await
        .unwrap();

    assert_eq!(response, None);
    assert_eq!(started.elapsed(), Duration::from_secs(30));
    let toasts = bridge.toasts.0.lock();
    assert_eq!(
        toasts.last(),
        Some(&Notice::new("Nothing was dictated.", Severity::Info))
    );
    assert!(bridge.document.lock().events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn unrelated_status_text_is_ignored() {
    let bridge = bridge();
    bridge.live.set(DICTATION);

    let response = bridge
        .source
        .on_stop_signal(StopSignal::StatusText("Listening".into()))
        .await
        .unwrap();

    assert_eq!(response, None);
    assert!(bridge.coordinator.state().latest_transcript.is_none());
}

#[tokio::test]
async fn source_page_answers_extract_requests() {
    let bridge = bridge();
    let empty = bridge
        .host
        .send(bridge.source_ctx, Message::ExtractTranscript)
        .await
        .unwrap();
    assert_eq!(empty, Response::Transcript { transcript: None });

    bridge.live.append("Age: 34");
    let partial = bridge
        .host
        .send(bridge.source_ctx, Message::ExtractTranscript)
        .await
        .unwrap();
    assert_eq!(
        partial,
        Response::Transcript {
            transcript: Some("Age: 34".into())
        }
    );
}
