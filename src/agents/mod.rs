//! The roles a context can play.

mod destination;
mod paste;
mod source;

pub use destination::DestinationAgent;
pub use paste::PasteFillSession;
pub use source::{LiveTranscript, SourceAgent};
