//! Single-pending, cancellable debounce timer.
//!
//! [`Debouncer::schedule`] arms a timer that runs an action once `delay` has
//! passed without another call. Scheduling again, or calling
//! [`Debouncer::cancel`], cancels the previous timer, so at most one timer is
//! pending at a time. Cancellation only affects timers that have not fired:
//! an action that has started always runs to completion.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Default quiet period before an autosave fires.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_secs(1);

struct PendingTimer {
    cancel: CancellationToken,
    fired: Arc<AtomicBool>,
}

/// A debounce timer owning at most one pending action.
///
/// Scheduling spawns onto the current tokio runtime. Dropping the debouncer
/// cancels the pending timer.
pub struct Debouncer {
    delay: Duration,
    pending: Option<PendingTimer>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending timer and arm a new one that runs `action` after
    /// the quiet period.
    pub fn schedule<F, Fut>(&mut self, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let cancel = CancellationToken::new();
        let fired = Arc::new(AtomicBool::new(false));
        let delay = self.delay;

        let token = cancel.clone();
        let fired_flag = Arc::clone(&fired);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    fired_flag.store(true, Ordering::SeqCst);
                    action().await;
                }
            }
        });

        self.pending = Some(PendingTimer { cancel, fired });
    }

    /// Cancel the pending timer, if any. Returns `true` if a timer that had
    /// not fired yet was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(timer) => {
                let was_waiting = !timer.fired.load(Ordering::SeqCst);
                timer.cancel.cancel();
                was_waiting
            }
            None => false,
        }
    }

    /// Whether a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|t| !t.cancel.is_cancelled() && !t.fired.load(Ordering::SeqCst))
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_DELAY)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
