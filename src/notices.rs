use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use scribebridge_core_types::Severity;
use scribebridge_event_bus::{EventBus, NoticeBus};

/// Renders every notice published on `bus` as a log line until the bus closes.
pub fn render_notices(bus: Arc<NoticeBus>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(notice) => match notice.severity {
                    Severity::Info => info!(target: "scribebridge::notice", "{}", notice.message),
                    Severity::Success => {
                        info!(target: "scribebridge::notice", success = true, "{}", notice.message)
                    }
                    Severity::Error => warn!(target: "scribebridge::notice", "{}", notice.message),
                    Severity::Blocking => {
                        error!(target: "scribebridge::notice", blocking = true, "{}", notice.message)
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "notice renderer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
