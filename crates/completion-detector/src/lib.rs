//! Completion detection for streamed dictation transcripts.

pub mod config;
pub mod signal;
pub mod state;
pub mod watcher;

pub use config::DetectorConfig;
pub use signal::StopSignal;
pub use state::{CompletionCheckState, CompletionDetector, CompletionReason, Phase, Transition};
pub use watcher::{watch, Completion, TranscriptProbe};
