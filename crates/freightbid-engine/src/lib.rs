//! # freightbid-engine
//!
//! **Auction Engine**: owns the reverse-auction lifecycle for freight
//! listings — creation, competitive bidding with monotonic-improvement
//! validation, and timer-driven settlement.
//!
//! ## Architecture
//!
//! - [`RecordStore`] — the narrow persistence seam; [`MemoryStore`] is the
//!   in-process implementation.
//! - [`AuctionLocks`] — per-auction serialization; different auctions run
//!   fully in parallel.
//! - [`SettlementScheduler`] — one-shot deferred settlement per auction,
//!   cancelled defensively inside the idempotent settle path.
//! - [`AuctionEngine`] — the operations: `create_auction`, `place_bid`,
//!   `settle_auction`, `get_auction`, `list_active_auctions`, plus the
//!   `settle_expired` reconciliation sweep.

pub mod engine;
pub mod locks;
pub mod memory;
pub mod scheduler;
pub mod store;

pub use engine::{ActiveAuction, AuctionDetail, AuctionEngine};
pub use locks::AuctionLocks;
pub use memory::MemoryStore;
pub use scheduler::SettlementScheduler;
pub use store::RecordStore;
