use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use field_extractor::FieldExtractor;
use field_matcher::FieldMatcher;
use fill_executor::FillReport;
use form_dom::SharedDocument;
use scribebridge_core_types::ControlId;
use scribebridge_event_bus::Notifier;

use crate::config::BridgeConfig;
use crate::pipeline::FillPipeline;

/// Fills a form from text pasted into one of its own controls.
///
/// A paste arriving while an earlier one is still being filled is dropped.
pub struct PasteFillSession {
    pipeline: FillPipeline,
    busy: AtomicBool,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl PasteFillSession {
    pub fn new(document: SharedDocument, config: &BridgeConfig, notifier: Arc<dyn Notifier>) -> Self {
        let matcher = FieldMatcher::new(config.matcher.paste.clone())
            .with_synonyms(config.matcher.synonym_table());
        Self {
            pipeline: FillPipeline::new(
                document,
                FieldExtractor::new(config.extractor.paste),
                config.survey.paste.clone(),
                matcher,
                config.fill.clone(),
                notifier,
            ),
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// `source` is the control the text was pasted into; it is never filled.
    pub async fn on_paste(&self, source: Option<ControlId>, text: &str) -> Option<FillReport> {
        if self.busy.swap(true, Ordering::SeqCst) {
            debug!("paste fill already running, dropping trigger");
            return None;
        }
        let _guard = BusyGuard(&self.busy);
        Some(self.pipeline.run(text, source).await)
    }
}
