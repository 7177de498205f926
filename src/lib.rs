//! ScribeBridge: moves clinical dictation from the page where it is captured into
//! the fields of a form open in another context.
//!
//! The component crates do the work; this crate wires them into the two agents a
//! context can run, the single-context paste path, configuration and the CLI.

pub mod agents;
pub mod cli;
pub mod config;
pub mod notices;
pub mod page_role;
pub mod pipeline;

pub use agents::{DestinationAgent, LiveTranscript, PasteFillSession, SourceAgent};
pub use config::BridgeConfig;
pub use page_role::PageRole;
pub use pipeline::FillPipeline;
