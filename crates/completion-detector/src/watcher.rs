use async_trait::async_trait;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use scribebridge_core_types::ScribeError;

use crate::config::DetectorConfig;
use crate::signal::StopSignal;
use crate::state::{CompletionDetector, CompletionReason, Transition};

/// Live view of the transcript being dictated.
#[async_trait]
pub trait TranscriptProbe: Send + Sync {
    async fn transcript(&self) -> Result<String, ScribeError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub transcript: String,
    pub reason: CompletionReason,
}

/// Polls `probe` from the moment `signal` is observed until the transcript settles or
/// the ceiling elapses. Returns `None` when `signal` is not a stop.
///
/// The ceiling preempts a pending tick; both timers are dropped on return.
#[instrument(skip_all, fields(signal = ?signal))]
pub async fn watch(
    probe: &dyn TranscriptProbe,
    signal: &StopSignal,
    config: &DetectorConfig,
) -> Option<Completion> {
    let mut detector = CompletionDetector::new(config.clone());
    if !detector.observe(signal) {
        return None;
    }
    debug!("watching transcript");

    let start = Instant::now();
    let ceiling = sleep(config.ceiling());
    tokio::pin!(ceiling);
    let mut ticker = interval_at(start + config.tick(), config.tick());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut latest = String::new();

    let reason = loop {
        tokio::select! {
            biased;
            _ = &mut ceiling => {
                if let Transition::Completed(reason) = detector.ceiling_elapsed() {
                    break reason;
                }
            }
            _ = ticker.tick() => {
                match probe.transcript().await {
                    Ok(text) => latest = text,
                    Err(err) => {
                        warn!(error = %err, "transcript probe failed");
                        continue;
                    }
                }
                if let Transition::Completed(reason) = detector.tick(latest.chars().count()) {
                    break reason;
                }
            }
        }
    };

    if reason == CompletionReason::Ceiling {
        // one last read so the ceiling path emits whatever was dictated
        match probe.transcript().await {
            Ok(text) => latest = text,
            Err(err) => warn!(error = %err, "final transcript read failed"),
        }
    }
    info!(?reason, chars = latest.chars().count(), elapsed_ms = start.elapsed().as_millis() as u64, "transcript complete");
    Some(Completion {
        transcript: latest,
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// Returns the next scripted transcript on every read, repeating the last one.
    struct Scripted {
        reads: Mutex<Vec<String>>,
        count: Mutex<usize>,
    }

    impl Scripted {
        fn lengths(lengths: &[usize]) -> Self {
            Self {
                reads: Mutex::new(lengths.iter().map(|len| "a".repeat(*len)).collect()),
                count: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl TranscriptProbe for Scripted {
        async fn transcript(&self) -> Result<String, ScribeError> {
            let reads = self.reads.lock();
            let mut count = self.count.lock();
            let idx = (*count).min(reads.len() - 1);
            *count += 1;
            Ok(reads[idx].clone())
        }
    }

    /// Grows by 10 characters on every read, forever.
    struct Growing(Mutex<usize>);

    #[async_trait]
    impl TranscriptProbe for Growing {
        async fn transcript(&self) -> Result<String, ScribeError> {
            let mut len = self.0.lock();
            *len += 10;
            Ok("b".repeat(*len))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stable_transcript_completes_five_ticks_after_growth_stops() {
        let probe = Scripted::lengths(&[310, 350, 380, 380]);
        let start = Instant::now();
        let done = watch(&probe, &StopSignal::StopPressed, &DetectorConfig::default())
            .await
            .unwrap();
        assert_eq!(done.reason, CompletionReason::Stable { ticks: 8 });
        assert_eq!(done.transcript.len(), 380);
        assert_eq!(start.elapsed(), Duration::from_secs(8));
    }

    #[tokio::test(start_paused = true)]
    async fn long_transcript_completes_after_four() {
        let probe = Scripted::lengths(&[480, 560]);
        let done = watch(&probe, &StopSignal::StopPressed, &DetectorConfig::default())
            .await
            .unwrap();
        assert_eq!(done.reason, CompletionReason::Stable { ticks: 6 });
    }

    #[tokio::test(start_paused = true)]
    async fn ceiling_forces_completion_while_still_growing() {
        let probe = Growing(Mutex::new(300));
        let start = Instant::now();
        let done = watch(&probe, &StopSignal::StopPressed, &DetectorConfig::default())
            .await
            .unwrap();
        assert_eq!(done.reason, CompletionReason::Ceiling);
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        assert!(done.transcript.len() > 300);
    }

    #[tokio::test(start_paused = true)]
    async fn non_stop_status_does_not_start_watching() {
        let probe = Scripted::lengths(&[400]);
        let signal = StopSignal::StatusText("Listening".into());
        assert!(watch(&probe, &signal, &DetectorConfig::default()).await.is_none());
    }
}
