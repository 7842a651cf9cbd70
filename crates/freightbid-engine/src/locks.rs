//! Per-auction serialization.
//!
//! The critical shared resource is a single auction's mutable fields
//! (status, current lowest bid, bid list). Every mutation — `place_bid`'s
//! check-then-act and `settle_auction`'s transition — runs under that
//! auction's async mutex; different auctions proceed fully in parallel.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use freightbid_types::AuctionId;

/// Registry of per-auction mutexes, created lazily on first use.
#[derive(Default)]
pub struct AuctionLocks {
    locks: Mutex<HashMap<AuctionId, Arc<AsyncMutex<()>>>>,
}

impl AuctionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutex for one auction, creating it if needed. The guard
    /// serializes all engine mutations for that auction id.
    pub async fn acquire(&self, id: AuctionId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Drop the bookkeeping entry for a settled auction. Waiters already
    /// holding a clone of the mutex are unaffected; they will observe the
    /// `Finished` status once they acquire it.
    pub fn discard(&self, id: AuctionId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }

    /// Number of auctions with live lock entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_auction_is_serialized() {
        let locks = Arc::new(AuctionLocks::new());
        let id = AuctionId::new();

        let guard = locks.acquire(id).await;
        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
            })
        };

        // The contender cannot finish while the first guard is held.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_auctions_do_not_contend() {
        let locks = AuctionLocks::new();
        let _a = locks.acquire(AuctionId::new()).await;
        // Acquiring a second auction's lock must not block.
        let _b = locks.acquire(AuctionId::new()).await;
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn discard_removes_entry() {
        let locks = AuctionLocks::new();
        let id = AuctionId::new();
        drop(locks.acquire(id).await);
        assert_eq!(locks.len(), 1);
        locks.discard(id);
        assert!(locks.is_empty());
    }
}
