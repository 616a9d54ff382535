//! Delayed page reloads with at most one pending attempt.
//!
//! When the upstream rejects a request (or is unreachable at startup) the
//! shell retries by reloading the webview after a short delay. Scheduling a
//! new reload replaces any pending one, so a burst of failures collapses
//! into a single retry.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay before retrying after an access rejection.
pub const AUTH_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Delay before retrying after a connection failure.
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Default)]
pub struct ReloadScheduler {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ReloadScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `action` after `delay`, cancelling any previously scheduled action.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        let mut pending = self.pending.lock().unwrap();
        if let Some(prev) = pending.replace(task) {
            prev.abort();
        }
    }

    /// Cancels the pending action, if any.
    pub fn cancel(&self) {
        if let Some(prev) = self.pending.lock().unwrap().take() {
            prev.abort();
        }
    }
}

impl Drop for ReloadScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn runs_action_after_delay() {
        let scheduler = ReloadScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        scheduler.schedule(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_action() {
        let scheduler = ReloadScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            let counter = fired.clone();
            scheduler.schedule(Duration::from_secs(1), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_pending_action() {
        let scheduler = ReloadScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        scheduler.schedule(Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        scheduler.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
