//! # freightbid-notify
//!
//! **Notification Fan-out**: pushes auction state-change events to
//! subscribers grouped by auction identifier (or a global channel for
//! `auction-started`).
//!
//! ## Design
//!
//! - [`EventBus`] is an injected, lifecycle-scoped component owned by the
//!   serving process — not a singleton.
//! - Its only interface is subscribe / unsubscribe / publish.
//! - Internally guarded by its own lock, independent of auction state locks.
//! - Delivery is best-effort and fire-and-forget: FIFO per subscriber,
//!   unordered across subscribers, and a dead subscriber is pruned rather
//!   than propagated as an error.

pub mod bus;

pub use bus::{EventBus, SubscriberId, Subscription};
