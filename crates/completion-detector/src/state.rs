use tracing::trace;

use crate::config::DetectorConfig;
use crate::signal::StopSignal;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Watching,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    Stable { ticks: u32 },
    Ceiling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Not watching; the input was ignored.
    Ignored,
    Pending,
    Completed(CompletionReason),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionCheckState {
    pub last_observed_length: usize,
    pub unchanged_tick_count: u32,
    pub has_crossed_long_threshold: bool,
    pub is_complete: bool,
}

/// `Idle -> Watching -> Complete`. Completion is reported exactly once.
#[derive(Clone, Debug)]
pub struct CompletionDetector {
    config: DetectorConfig,
    phase: Phase,
    check: Option<CompletionCheckState>,
    ticks: u32,
}

impl CompletionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            check: None,
            ticks: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn check_state(&self) -> Option<&CompletionCheckState> {
        self.check.as_ref()
    }

    /// Starts watching when `signal` is a stop. Returns whether the phase changed.
    pub fn observe(&mut self, signal: &StopSignal) -> bool {
        if self.phase != Phase::Idle || !signal.is_stop() {
            return false;
        }
        self.phase = Phase::Watching;
        self.check = Some(CompletionCheckState::default());
        self.ticks = 0;
        true
    }

    pub fn tick(&mut self, length: usize) -> Transition {
        if self.phase != Phase::Watching {
            return Transition::Ignored;
        }
        let config = &self.config;
        let check = self.check.get_or_insert_with(CompletionCheckState::default);
        self.ticks += 1;

        if length != check.last_observed_length || length < config.min_length {
            check.unchanged_tick_count = 0;
        } else {
            check.unchanged_tick_count += 1;
        }
        check.last_observed_length = length;
        if length >= config.long_threshold {
            check.has_crossed_long_threshold = true;
        }

        let required = if check.has_crossed_long_threshold {
            config.long_stable_ticks
        } else {
            config.short_stable_ticks
        };
        trace!(tick = self.ticks, length, unchanged = check.unchanged_tick_count, required, "completion tick");
        if check.unchanged_tick_count >= required {
            return self.finish(CompletionReason::Stable { ticks: self.ticks });
        }
        Transition::Pending
    }

    /// The hard ceiling elapsed.
    pub fn ceiling_elapsed(&mut self) -> Transition {
        if self.phase != Phase::Watching {
            return Transition::Ignored;
        }
        self.finish(CompletionReason::Ceiling)
    }

    fn finish(&mut self, reason: CompletionReason) -> Transition {
        self.phase = Phase::Complete;
        if let Some(check) = self.check.as_mut() {
            check.is_complete = true;
        }
        Transition::Completed(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn watching() -> CompletionDetector {
        let mut detector = CompletionDetector::new(DetectorConfig::default());
        assert!(detector.observe(&StopSignal::StopPressed));
        detector
    }

    /// Feeds `lengths` and returns the 1-based tick that completed, if any.
    fn run(detector: &mut CompletionDetector, lengths: &[usize]) -> Option<usize> {
        lengths
            .iter()
            .position(|len| matches!(detector.tick(*len), Transition::Completed(_)))
            .map(|idx| idx + 1)
    }

    #[test]
    fn short_transcript_needs_five_unchanged_ticks() {
        let mut detector = watching();
        let mut lengths = vec![320, 360, 400];
        lengths.extend([400; 10]);
        // growth stops after tick 3; five unchanged ticks later is tick 8
        assert_eq!(run(&mut detector, &lengths), Some(8));
        assert_eq!(detector.phase(), Phase::Complete);
        assert!(detector.check_state().unwrap().is_complete);
    }

    #[test]
    fn long_transcript_needs_four() {
        let mut detector = watching();
        let mut lengths = vec![450, 520];
        lengths.extend([520; 10]);
        assert_eq!(run(&mut detector, &lengths), Some(6));
        assert!(detector.check_state().unwrap().has_crossed_long_threshold);
    }

    #[test]
    fn crossing_is_sticky_after_shrinking() {
        let mut detector = watching();
        let mut lengths = vec![510, 480];
        lengths.extend([480; 10]);
        assert_eq!(run(&mut detector, &lengths), Some(6));
    }

    #[test]
    fn short_floor_blocks_completion() {
        let mut detector = watching();
        assert_eq!(run(&mut detector, &[120; 40]), None);
        assert_eq!(detector.check_state().unwrap().unchanged_tick_count, 0);
    }

    #[test]
    fn idle_detector_ignores_ticks_and_non_stop_status() {
        let mut detector = CompletionDetector::new(DetectorConfig::default());
        assert_eq!(detector.tick(400), Transition::Ignored);
        assert!(!detector.observe(&StopSignal::StatusText("Recording".into())));
        assert_eq!(detector.phase(), Phase::Idle);
    }

    #[test]
    fn completes_only_once() {
        let mut detector = watching();
        assert_eq!(
            detector.ceiling_elapsed(),
            Transition::Completed(CompletionReason::Ceiling)
        );
        assert_eq!(detector.ceiling_elapsed(), Transition::Ignored);
        assert_eq!(detector.tick(900), Transition::Ignored);
        assert!(!detector.observe(&StopSignal::StopPressed));
    }
}
