use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use coordination_hub::{
    ContextEndpoint, CoordinationError, CoordinatorClient, Message, Response,
};
use field_extractor::FieldExtractor;
use field_matcher::FieldMatcher;
use fill_executor::FillReport;
use form_dom::SharedDocument;
use form_surveyor::has_form_surface;
use scribebridge_event_bus::Notifier;

use crate::config::BridgeConfig;
use crate::pipeline::FillPipeline;

/// Runs in a context that may host the destination form.
pub struct DestinationAgent {
    pipeline: FillPipeline,
    min_form_controls: usize,
}

impl DestinationAgent {
    pub fn new(document: SharedDocument, config: &BridgeConfig, notifier: Arc<dyn Notifier>) -> Self {
        let matcher = FieldMatcher::new(config.matcher.destination.clone())
            .with_synonyms(config.matcher.synonym_table());
        Self {
            pipeline: FillPipeline::new(
                document,
                FieldExtractor::new(config.extractor.dictation),
                config.survey.destination.clone(),
                matcher,
                config.fill.clone(),
                notifier,
            ),
            min_form_controls: config.survey.min_form_controls,
        }
    }

    pub fn has_form_surface(&self) -> bool {
        let document = self.pipeline.document().lock();
        has_form_surface(&document, self.pipeline.survey_policy(), self.min_form_controls)
    }

    /// Tells the coordinator this page is the destination, when it has a form.
    pub async fn announce(
        &self,
        client: &CoordinatorClient,
    ) -> Result<Option<Response>, CoordinationError> {
        if !self.has_form_surface() {
            debug!(context = %client.context(), "no form surface, staying quiet");
            return Ok(None);
        }
        client.send(Message::IdentifyAsDestination).await.map(Some)
    }

    #[instrument(skip_all)]
    pub async fn fill_from(&self, transcript: &str) -> FillReport {
        self.pipeline.run(transcript, None).await
    }

    pub fn teardown(&self) {
        self.pipeline.teardown();
    }
}

#[async_trait]
impl ContextEndpoint for DestinationAgent {
    async fn handle(&self, message: Message) -> Result<Response, CoordinationError> {
        match message {
            Message::HasFormSurface => Ok(Response::FormSurface {
                has_form: self.has_form_surface(),
            }),
            Message::DeliverTranscript { transcript } => {
                let report = self.fill_from(&transcript).await;
                Ok(Response::Filled {
                    filled: report.filled,
                    skipped: report.skipped,
                    failed: report.failed,
                })
            }
            other => Err(CoordinationError::NotHandled(other.kind())),
        }
    }
}
