use std::sync::Arc;

use tracing::{info, instrument};

use field_extractor::FieldExtractor;
use field_matcher::FieldMatcher;
use fill_executor::{DocumentPort, FillExecutor, FillPolicy, FillReport};
use form_dom::SharedDocument;
use form_surveyor::{survey, SurveyPolicy};
use scribebridge_core_types::{ControlId, RunId, Severity};
use scribebridge_event_bus::Notifier;

/// Extract, survey, match, fill. One component for both the paste path and the
/// cross-context path; the two differ only in the injected dialect and policies.
pub struct FillPipeline {
    document: SharedDocument,
    extractor: FieldExtractor,
    survey: SurveyPolicy,
    matcher: FieldMatcher,
    executor: FillExecutor,
    notifier: Arc<dyn Notifier>,
}

impl FillPipeline {
    pub fn new(
        document: SharedDocument,
        extractor: FieldExtractor,
        survey: SurveyPolicy,
        matcher: FieldMatcher,
        fill: FillPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let port = Arc::new(DocumentPort::new(document.clone()));
        Self {
            document,
            extractor,
            survey,
            matcher,
            executor: FillExecutor::new(port, fill),
            notifier,
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn survey_policy(&self) -> &SurveyPolicy {
        &self.survey
    }

    /// Runs the whole pipeline over `text`. `exclude` is the control the text came
    /// from, if any.
    #[instrument(skip_all, fields(run = %RunId::new(), dialect = self.extractor.dialect_name(), chars = text.len()))]
    pub async fn run(&self, text: &str, exclude: Option<ControlId>) -> FillReport {
        let fields = self.extractor.extract(text);
        if fields.is_empty() {
            self.notifier
                .notify("No recognizable fields found in the transcript.", Severity::Info)
                .await;
            return FillReport::default();
        }

        let controls = {
            let document = self.document.lock();
            survey(&document, exclude, &self.survey)
        };
        let mappings = self.matcher.match_fields(&fields, &controls);
        if mappings.is_empty() {
            self.notifier
                .notify("No matching form fields found on this page.", Severity::Info)
                .await;
            return FillReport {
                skipped: fields.len(),
                ..FillReport::default()
            };
        }

        let mut report = self.executor.fill_all(&mappings).await;
        report.skipped += fields.len() - mappings.len();
        info!(
            extracted = fields.len(),
            matched = mappings.len(),
            filled = report.filled,
            "pipeline finished"
        );
        self.notifier
            .notify(
                &format!("Filled {} of {} fields.", report.filled, fields.len()),
                Severity::Success,
            )
            .await;
        report
    }

    /// Cancels highlight reverts still pending from earlier runs.
    pub fn teardown(&self) {
        self.executor.cancel_highlights();
    }
}
