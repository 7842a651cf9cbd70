//! The event bus: a scope-keyed subscriber registry.
//!
//! One registry per serving process, injected into whatever owns it — never
//! a global. Each subscriber gets its own unbounded channel, so delivery to
//! one subscriber is FIFO and a slow or vanished subscriber can neither
//! block nor fail `publish`. No ordering guarantee exists *across*
//! subscribers.
//!
//! The registry lock is independent of any auction state lock: publishing
//! happens after the engine commits a mutation, outside its critical
//! section.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio::sync::mpsc;

use freightbid_types::{AuctionEvent, Scope};

/// Process-unique handle for one subscriber connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub:{}", self.0)
    }
}

struct Registry {
    counter: AtomicUsize,
    groups: Mutex<HashMap<Scope, HashMap<SubscriberId, mpsc::UnboundedSender<AuctionEvent>>>>,
}

/// Scope-keyed notification fan-out.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Registry>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                counter: AtomicUsize::new(0),
                groups: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Join a subscriber group. The returned [`Subscription`] receives every
    /// event published to `scope` from now on and leaves the group when
    /// dropped (client disconnect).
    #[must_use]
    pub fn subscribe(&self, scope: Scope) -> Subscription {
        let id = SubscriberId(self.registry.counter.fetch_add(1, Ordering::SeqCst));
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock_groups().entry(scope).or_default().insert(id, tx);
        tracing::debug!(subscriber = %id, %scope, "subscriber joined");
        Subscription {
            bus: self.clone(),
            scope,
            id,
            rx,
        }
    }

    /// Explicit leave. Idempotent: unknown ids are ignored.
    pub fn unsubscribe(&self, scope: Scope, id: SubscriberId) {
        let mut groups = self.lock_groups();
        if let Some(group) = groups.get_mut(&scope) {
            group.remove(&id);
            if group.is_empty() {
                groups.remove(&scope);
            }
        }
    }

    /// Deliver `event` to every current subscriber of its scope.
    ///
    /// Best-effort and fire-and-forget: subscribers whose receiving end is
    /// gone are pruned, and the publisher never blocks. Returns the number
    /// of subscribers the event was handed to.
    pub fn publish(&self, event: &AuctionEvent) -> usize {
        let scope = event.scope();
        let mut groups = self.lock_groups();
        let Some(group) = groups.get_mut(&scope) else {
            return 0;
        };

        let mut delivered = 0;
        group.retain(|id, tx| match tx.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                tracing::debug!(subscriber = %id, %scope, "pruning disconnected subscriber");
                false
            }
        });
        if group.is_empty() {
            groups.remove(&scope);
        }

        tracing::debug!(event = event.name(), %scope, delivered, "published event");
        delivered
    }

    /// Current size of one subscriber group.
    #[must_use]
    pub fn subscriber_count(&self, scope: Scope) -> usize {
        self.lock_groups().get(&scope).map_or(0, HashMap::len)
    }

    #[allow(clippy::type_complexity)]
    fn lock_groups(
        &self,
    ) -> std::sync::MutexGuard<
        '_,
        HashMap<Scope, HashMap<SubscriberId, mpsc::UnboundedSender<AuctionEvent>>>,
    > {
        // Subscriber bookkeeping never panics while holding the lock.
        self.registry
            .groups
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// One subscriber's membership in a scope group.
///
/// Dropping the subscription removes the subscriber from the registry.
pub struct Subscription {
    bus: EventBus,
    scope: Scope,
    id: SubscriberId,
    rx: mpsc::UnboundedReceiver<AuctionEvent>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Wait for the next event. Returns `None` once unsubscribed and the
    /// backlog is drained.
    pub async fn recv(&mut self) -> Option<AuctionEvent> {
        self.rx.recv().await
    }

    /// Non-blocking poll, for callers that only want the backlog.
    pub fn try_recv(&mut self) -> Option<AuctionEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.scope, self.id);
    }
}
