use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use completion_detector::StopSignal;
use coordination_hub::{Coordinator, InMemoryHost, Response};
use form_dom::{shared, ControlSpec, FormDocument, SelectOption, SharedDocument};
use form_surveyor::{resolve_label, SurveyPolicy};
use scribebridge_core_types::{ContextId, WindowId};
use scribebridge_event_bus::NoticeBus;

use super::output::{emit_structured, OutputFormat};
use crate::agents::{DestinationAgent, LiveTranscript, SourceAgent};
use crate::config::BridgeConfig;
use crate::notices::render_notices;
use crate::page_role::PageRole;

const SAMPLE_DICTATION: &str = "Patient name is Jane Doe. Age is 34. Gender: female. \
Blood pressure 128/82. Heart rate 76. Temperature 98.9. \
Chief complaint is intermittent headaches for two weeks, worse in the mornings. \
Past medical history of migraine in her twenties. Medications: ibuprofen as needed. \
Allergies: penicillin. Assessment: tension type headache. \
Plan: hydration, sleep hygiene and a headache diary. Follow up in four weeks.";

const DESTINATION_URL: &str = "https://ehr.example.org/encounters/new";

#[derive(Args, Clone, Debug)]
pub struct DemoArgs {
    /// Dictation to stream into the source page; a built-in sample when omitted
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// JSON array of control descriptions for the destination page
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Override the completion tick interval
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Skip the destination's self-announcement so the coordinator has to discover it
    #[arg(long)]
    pub discover: bool,
}

#[derive(Debug, Serialize)]
struct DemoSummary {
    source: ContextId,
    destination: Option<ContextId>,
    focused: Option<ContextId>,
    delivery: Option<Response>,
    fields: Vec<FieldValue>,
}

#[derive(Debug, Serialize)]
struct FieldValue {
    label: String,
    value: String,
}

pub async fn cmd_demo(args: DemoArgs, mut config: BridgeConfig, format: OutputFormat) -> Result<()> {
    if let Some(tick_ms) = args.tick_ms {
        if tick_ms == 0 {
            bail!("--tick-ms must be positive");
        }
        config.completion.tick_ms = tick_ms;
    }
    let dictation = match &args.transcript {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => SAMPLE_DICTATION.to_string(),
    };
    let form = match &args.form {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            FormDocument::from_json(&raw).context("Invalid form description")?
        }
        None => intake_form()?,
    };

    let bus = NoticeBus::new(64);
    let renderer = render_notices(bus.clone());
    let host = InMemoryHost::new();
    let coordinator = Coordinator::new(
        host.clone(),
        bus.clone(),
        config.coordination.delivery.clone(),
    );
    let closures = coordinator.watch_closures();

    let document = shared(form);
    let destination = Arc::new(DestinationAgent::new(document.clone(), &config, bus.clone()));
    let live = LiveTranscript::new();

    let source_url = config.coordination.source_origin.clone();
    let pages = [
        (WindowId(1), source_url.as_str()),
        (WindowId(1), "chrome://newtab/"),
        (WindowId(2), DESTINATION_URL),
    ];
    let mut source = None;
    let mut destination_ctx = None;
    for (window, url) in pages {
        let context = host.open(window, url);
        let role = PageRole::classify(url, &source_url);
        info!(%context, url, ?role, "context opened");
        match role {
            PageRole::Source => {
                let agent = Arc::new(SourceAgent::new(
                    live.clone(),
                    coordinator.client(context),
                    config.completion.clone(),
                    bus.clone(),
                ));
                host.attach(context, agent.clone())?;
                source = Some((context, agent));
            }
            PageRole::Destination => {
                host.attach(context, destination.clone())?;
                destination_ctx = Some(context);
            }
            PageRole::Ignored => {}
        }
    }
    let (Some((source_ctx, source)), Some(destination_ctx)) = (source, destination_ctx) else {
        bail!("source origin {source_url} must be an http(s) origin distinct from the form page");
    };

    if !args.discover {
        let client = coordinator.client(destination_ctx);
        if destination.announce(&client).await?.is_none() {
            warn!("destination page has no form surface");
        }
    }

    // The dictation application keeps streaming for a while after stop is pressed.
    let pace = config.completion.tick() / 2;
    let feeder = {
        let live = live.clone();
        let source = source.clone();
        tokio::spawn(async move {
            for sentence in dictation.split_inclusive(". ") {
                live.append(sentence);
                if let Err(err) = source.publish_progress().await {
                    warn!(error = %err, "progress update failed");
                }
                tokio::time::sleep(pace).await;
            }
        })
    };
    let delivery = source.on_stop_signal(StopSignal::StopPressed).await?;
    feeder.await.context("dictation feeder panicked")?;

    let summary = DemoSummary {
        source: source_ctx,
        destination: coordinator.state().destination_context_id,
        focused: host.focused(),
        delivery,
        fields: field_values(&document),
    };
    destination.teardown();
    closures.abort();
    drop(coordinator);
    // Give the renderer a moment to flush the last notices.
    tokio::time::sleep(Duration::from_millis(50)).await;
    renderer.abort();

    if emit_structured(format, &summary)? {
        return Ok(());
    }
    match &summary.delivery {
        Some(response) => println!("Delivery: {}", serde_json::to_string(response)?),
        None => println!("Delivery: nothing delivered"),
    }
    println!(
        "Focused context: {}",
        summary
            .focused
            .map(|ctx| ctx.to_string())
            .unwrap_or_else(|| "unchanged".into())
    );
    for field in &summary.fields {
        println!("{:<28} {}", field.label, field.value);
    }
    Ok(())
}

fn field_values(document: &SharedDocument) -> Vec<FieldValue> {
    let document = document.lock();
    let policy = SurveyPolicy::default();
    document
        .controls()
        .filter(|control| !control.kind.is_action())
        .map(|control| {
            let value = match control.selected_option() {
                Some(option) => option.text.clone(),
                None if control.kind.is_text_like() => control.value().to_string(),
                None => {
                    if control.checked {
                        "checked".into()
                    } else {
                        String::new()
                    }
                }
            };
            let label = resolve_label(&document, control, &policy);
            FieldValue {
                label: if label.is_empty() {
                    control.id.to_string()
                } else {
                    label
                },
                value,
            }
        })
        .collect()
}

fn intake_form() -> Result<FormDocument> {
    let form = FormDocument::from_specs(vec![
        ControlSpec::new("text").id("patient-name").label("Patient Name").reactive(),
        ControlSpec::new("text").id("age").label("Age").reactive(),
        ControlSpec::new("select")
            .name("gender")
            .id("sex")
            .label("Sex")
            .options(vec![
                SelectOption::new("", "Select..."),
                SelectOption::new("f", "Female"),
                SelectOption::new("m", "Male"),
                SelectOption::new("x", "Other"),
            ]),
        ControlSpec::new("text").name("bp").placeholder("Blood Pressure"),
        ControlSpec::new("text").name("hr").aria_label("Heart rate"),
        ControlSpec::new("text").id("temp").label("Temperature"),
        ControlSpec::new("textarea")
            .name("cc")
            .wrapping_label("Presenting Complaint")
            .reactive(),
        ControlSpec::new("textarea").id("pmh").label("Past Medical History"),
        ControlSpec::new("text").id("meds").label("Current Medications"),
        ControlSpec::new("text").id("allergies").label("Allergies"),
        ControlSpec::new("textarea").id("assessment").label("Assessment"),
        ControlSpec::new("textarea").id("plan").label("Plan"),
        ControlSpec::new("text").id("followup").label("Follow up"),
        ControlSpec::new("submit").name("save"),
    ])?;
    Ok(form)
}
