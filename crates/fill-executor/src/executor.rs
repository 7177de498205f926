use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use field_matcher::Mapping;
use scribebridge_core_types::{ControlId, WidgetKind};

use crate::errors::FillError;
use crate::model::{FillOutcome, FillReport};
use crate::policy::FillPolicy;
use crate::ports::FillPort;
use crate::strategies;
use crate::timed::TimedTask;

/// Applies mappings one control at a time.
///
/// Pending highlight reverts belong to the executor: [`FillExecutor::cancel_highlights`]
/// or dropping the executor cancels them.
pub struct FillExecutor {
    port: Arc<dyn FillPort>,
    policy: FillPolicy,
    highlights: Mutex<Vec<TimedTask>>,
}

impl FillExecutor {
    pub fn new(port: Arc<dyn FillPort>, policy: FillPolicy) -> Self {
        Self {
            port,
            policy,
            highlights: Mutex::new(Vec::new()),
        }
    }

    pub fn policy(&self) -> &FillPolicy {
        &self.policy
    }

    #[instrument(skip_all, fields(key = %mapping.key, control = %mapping.control.control))]
    pub async fn fill(&self, mapping: &Mapping) -> Result<FillOutcome, FillError> {
        let control = mapping.control.control;
        let snapshot = self.port.snapshot(control).await?;
        if snapshot.kind.is_action() {
            return Err(FillError::Unsupported {
                control,
                kind: snapshot.kind,
            });
        }
        if !snapshot.editable {
            return Err(FillError::NotEditable(control));
        }

        self.port.scroll_into_view(control).await?;
        tokio::time::sleep(self.policy.settle()).await;
        self.highlight(control).await?;

        let port = self.port.as_ref();
        let outcome = match snapshot.kind {
            WidgetKind::Select => strategies::fill_select(port, &snapshot, &mapping.value).await?,
            WidgetKind::Radio => strategies::fill_radio(port, &snapshot, &mapping.value).await?,
            WidgetKind::Checkbox => {
                strategies::fill_checkbox(port, &snapshot, &mapping.value).await?
            }
            _ => strategies::fill_text(port, control, &mapping.value).await?,
        };
        debug!(?outcome, "fill finished");
        Ok(outcome)
    }

    /// Fills strictly in order with a settle pause between controls. A failing
    /// mapping is logged and counted; the rest of the batch still runs.
    #[instrument(skip_all, fields(mappings = mappings.len()))]
    pub async fn fill_all(&self, mappings: &[Mapping]) -> FillReport {
        let mut report = FillReport::default();
        for (idx, mapping) in mappings.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.policy.settle()).await;
            }
            match self.fill(mapping).await {
                Ok(FillOutcome::Filled) => report.filled += 1,
                Ok(FillOutcome::Skipped(reason)) => {
                    debug!(key = %mapping.key, reason, "fill skipped");
                    report.skipped += 1;
                }
                Err(err) => {
                    warn!(key = %mapping.key, control = %mapping.control.control, error = %err, "fill failed");
                    report.failed += 1;
                }
            }
        }
        info!(filled = report.filled, skipped = report.skipped, failed = report.failed, "batch filled");
        report
    }

    /// Drops every pending highlight revert without running it.
    pub fn cancel_highlights(&self) {
        let pending = std::mem::take(&mut *self.highlights.lock());
        debug!(count = pending.len(), "cancelling highlight reverts");
        drop(pending);
    }

    async fn highlight(&self, control: ControlId) -> Result<(), FillError> {
        self.port
            .set_outline(control, Some(self.policy.highlight_outline.clone()))
            .await?;
        let port = Arc::clone(&self.port);
        let revert = TimedTask::spawn(self.policy.highlight(), async move {
            if let Err(err) = port.set_outline(control, None).await {
                debug!(%control, error = %err, "highlight revert failed");
            }
        });
        let mut highlights = self.highlights.lock();
        highlights.retain(|task| !task.is_finished());
        highlights.push(revert);
        Ok(())
    }
}
