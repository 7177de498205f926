//! Cross-context coordination.
//!
//! A [`Coordinator`] tracks which context produces the transcript and which one hosts
//! the destination form, finds the destination when it is not yet known, delivers
//! the transcript there and switches focus to it. Contexts reach it through a
//! [`CoordinatorClient`]; the coordinator reaches contexts through a [`ContextHost`].

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod host;
pub mod memory;
pub mod message;

pub use config::CoordinationConfig;
pub use coordinator::{Coordinator, CoordinatorClient, TranscriptState};
pub use errors::CoordinationError;
pub use host::{ContextEndpoint, ContextEvent, ContextHost, ContextInfo};
pub use memory::InMemoryHost;
pub use message::{Message, Response, StateSnapshot};
