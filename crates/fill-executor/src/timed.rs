use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A deferred side effect owned by whoever scheduled it.
///
/// The effect runs once `delay` elapses unless the task is cancelled or dropped
/// first.
pub struct TimedTask {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TimedTask {
    pub fn spawn<F>(delay: Duration, effect: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => effect.await,
            }
        });
        Self {
            cancel,
            task: Some(task),
        }
    }

    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for TimedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
