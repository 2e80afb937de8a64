use std::{
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::log_warn;

use super::ENABLE_LOGS;

struct PendingTimer {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl PendingTimer {
    fn stop(self) -> bool {
        let was_pending = !self.handle.is_finished();
        self.cancel_token.cancel();
        self.handle.abort();
        was_pending
    }
}

/// Cancellable single-shot timer. At most one callback is pending; scheduling
/// a new one cancels the previous one before it can fire.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<PendingTimer>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `task` once `delay` passes without another `schedule` or `cancel`.
    ///
    /// Outside a tokio runtime there is nothing to wait on, so `task` runs
    /// immediately.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.stop();
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                log_warn!("No async runtime for debounced write ({err}); running it now");
                drop(pending);
                task();
                return;
            }
        };

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let delay = self.delay;

        let handle = runtime.spawn(async move {
            tokio::select! {
                _ = token_clone.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if !token_clone.is_cancelled() {
                        task();
                    }
                }
            }
        });

        *pending = Some(PendingTimer {
            cancel_token,
            handle,
        });
    }

    /// Cancel the pending callback. Returns whether one was still waiting.
    pub fn cancel(&self) -> bool {
        self.lock_pending()
            .take()
            .map(PendingTimer::stop)
            .unwrap_or(false)
    }

    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .map(|timer| !timer.handle.is_finished())
            .unwrap_or(false)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingTimer>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
