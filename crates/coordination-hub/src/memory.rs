use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::debug;

use scribebridge_core_types::{ContextId, WindowId};

use crate::errors::CoordinationError;
use crate::host::{ContextEndpoint, ContextEvent, ContextHost, ContextInfo};
use crate::message::{Message, Response};

struct ContextSlot {
    info: ContextInfo,
    endpoint: Option<Arc<dyn ContextEndpoint>>,
}

/// Single-process host: contexts are registered endpoints, focus is bookkeeping.
pub struct InMemoryHost {
    contexts: DashMap<ContextId, ContextSlot>,
    next_id: AtomicU64,
    focused: Mutex<Option<ContextId>>,
    focused_window: Mutex<Option<WindowId>>,
    events: broadcast::Sender<ContextEvent>,
}

impl InMemoryHost {
    pub fn new() -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            contexts: DashMap::new(),
            next_id: AtomicU64::new(1),
            focused: Mutex::new(None),
            focused_window: Mutex::new(None),
            events,
        })
    }

    pub fn open(&self, window: WindowId, url: impl Into<String>) -> ContextId {
        let id = ContextId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.contexts.insert(
            id,
            ContextSlot {
                info: ContextInfo {
                    id,
                    window,
                    url: url.into(),
                },
                endpoint: None,
            },
        );
        let _ = self.events.send(ContextEvent::Opened(id));
        id
    }

    /// Installs the message handler of `context`; a context without one does not listen.
    pub fn attach(
        &self,
        context: ContextId,
        endpoint: Arc<dyn ContextEndpoint>,
    ) -> Result<(), CoordinationError> {
        let mut slot = self
            .contexts
            .get_mut(&context)
            .ok_or(CoordinationError::ContextGone(context))?;
        slot.endpoint = Some(endpoint);
        Ok(())
    }

    pub fn close(&self, context: ContextId) {
        if self.contexts.remove(&context).is_some() {
            debug!(%context, "context closed");
            let _ = self.events.send(ContextEvent::Closed(context));
        }
    }

    /// The context in front, if focus was ever switched.
    pub fn focused(&self) -> Option<ContextId> {
        *self.focused.lock()
    }

    pub fn focused_window(&self) -> Option<WindowId> {
        *self.focused_window.lock()
    }
}

#[async_trait]
impl ContextHost for InMemoryHost {
    async fn contexts(&self) -> Result<Vec<ContextInfo>, CoordinationError> {
        let mut all: Vec<ContextInfo> = self
            .contexts
            .iter()
            .map(|entry| entry.value().info.clone())
            .collect();
        all.sort_by_key(|info| info.id);
        Ok(all)
    }

    async fn send(
        &self,
        context: ContextId,
        message: Message,
    ) -> Result<Response, CoordinationError> {
        // clone out of the map so no shard lock is held across the await
        let endpoint = {
            let slot = self
                .contexts
                .get(&context)
                .ok_or(CoordinationError::ContextGone(context))?;
            slot.endpoint
                .clone()
                .ok_or(CoordinationError::NotListening(context))?
        };
        endpoint.handle(message).await
    }

    async fn focus_window(&self, window: WindowId) -> Result<(), CoordinationError> {
        *self.focused_window.lock() = Some(window);
        Ok(())
    }

    async fn activate(&self, context: ContextId) -> Result<(), CoordinationError> {
        if !self.contexts.contains_key(&context) {
            return Err(CoordinationError::ContextGone(context));
        }
        *self.focused.lock() = Some(context);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ContextEvent> {
        self.events.subscribe()
    }
}
