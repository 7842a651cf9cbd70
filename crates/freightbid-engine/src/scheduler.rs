//! One-shot settlement scheduling.
//!
//! The engine decides *what* happens at expiry (settlement); this module
//! owns *how* expiry is scheduled. The in-process implementation is a
//! spawned task per auction sleeping until `end_time`. An external job
//! queue or durable wake-up could substitute behind the same surface.
//!
//! Cancellation is defensive bookkeeping only: a fired-or-cancelled timer
//! is always safe because settlement itself is idempotent.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
    time::Duration,
};

use tokio::task::JoinHandle;

use freightbid_types::AuctionId;

/// Registry of pending one-shot settlement tasks, keyed by auction id.
#[derive(Default)]
pub struct SettlementScheduler {
    tasks: Mutex<HashMap<AuctionId, JoinHandle<()>>>,
}

impl SettlementScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deferred task that runs `settle` after `delay`.
    /// Rescheduling the same auction replaces (and aborts) the old task.
    pub fn schedule<F>(&self, id: AuctionId, delay: Duration, settle: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            settle.await;
        });
        tracing::debug!(auction = %id, delay_secs = delay.as_secs(), "settlement timer scheduled");

        let mut tasks = self.lock_tasks();
        if let Some(old) = tasks.insert(id, handle) {
            old.abort();
        }
    }

    /// Cancel the pending task for one auction, if any. Returns whether a
    /// task entry existed.
    pub fn cancel(&self, id: AuctionId) -> bool {
        match self.lock_tasks().remove(&id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of auctions with a registered (possibly already fired) task.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock_tasks().len()
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, HashMap<AuctionId, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SettlementScheduler {
    fn drop(&mut self) {
        for handle in self.lock_tasks().values() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[tokio::test(start_paused = true)]
    async fn timer_fires_after_delay() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&fired);
        scheduler.schedule(AuctionId::new(), Duration::from_secs(300), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let id = AuctionId::new();

        let counter = Arc::clone(&fired);
        scheduler.schedule(id, Duration::from_secs(300), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id), "second cancel finds nothing");

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reschedule_replaces_old_task() {
        let scheduler = SettlementScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let id = AuctionId::new();

        for _ in 0..2 {
            let counter = Arc::clone(&fired);
            scheduler.schedule(id, Duration::from_secs(10), async move {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(scheduler.pending(), 1);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1, "old task must be aborted");
    }
}
