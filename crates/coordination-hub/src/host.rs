use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use url::Url;

use scribebridge_core_types::{ContextId, WindowId};

use crate::errors::CoordinationError;
use crate::message::{Message, Response};

/// One open browsing context as the host reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextInfo {
    pub id: ContextId,
    pub window: WindowId,
    pub url: String,
}

impl ContextInfo {
    pub fn is_web(&self) -> bool {
        Url::parse(&self.url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextEvent {
    Opened(ContextId),
    Closed(ContextId),
}

/// The environment hosting every context: enumeration, messaging and focus.
#[async_trait]
pub trait ContextHost: Send + Sync {
    async fn contexts(&self) -> Result<Vec<ContextInfo>, CoordinationError>;
    async fn send(&self, context: ContextId, message: Message)
        -> Result<Response, CoordinationError>;
    async fn focus_window(&self, window: WindowId) -> Result<(), CoordinationError>;
    async fn activate(&self, context: ContextId) -> Result<(), CoordinationError>;
    fn subscribe(&self) -> broadcast::Receiver<ContextEvent>;
}

/// Message handler living inside one context.
#[async_trait]
pub trait ContextEndpoint: Send + Sync {
    async fn handle(&self, message: Message) -> Result<Response, CoordinationError>;
}
