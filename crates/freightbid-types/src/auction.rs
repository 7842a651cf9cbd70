//! Auction types for the reverse-bidding lifecycle.
//!
//! An auction is created atomically with its cargo link, runs for a fixed
//! window, and terminates exactly once: **Active → Finished** (one-way,
//! terminal). Lower bids win; every accepted bid must strictly undercut the
//! current lowest.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, CargoId};

/// Lifecycle status of an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    /// Open for bids until `end_time`.
    Active,
    /// Settled. Terminal: no further transitions, no further bids.
    Finished,
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "ACTIVE"),
            Self::Finished => write!(f, "FINISHED"),
        }
    }
}

/// A time-bounded reverse auction tied to exactly one cargo listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: AuctionId,
    /// 1:1 — a cargo has at most one live auction; a zero-bid expiry
    /// releases it for relisting.
    pub cargo: CargoId,
    pub start_time: DateTime<Utc>,
    /// `start_time + auction_duration`; the settlement timer fires here.
    pub end_time: DateTime<Utc>,
    pub status: AuctionStatus,
    /// Bid references in arrival order.
    pub bids: Vec<BidId>,
    /// Set once, when the auction transitions to `Finished` with bids.
    pub winning_bid: Option<BidId>,
    /// Mirrors the amount of the most recently accepted (lowest) bid.
    pub current_lowest_bid: Option<Decimal>,
}

impl Auction {
    /// Open a new auction for `cargo` with the given window.
    #[must_use]
    pub fn open(cargo: CargoId, start_time: DateTime<Utc>, duration: std::time::Duration) -> Self {
        Self {
            id: AuctionId::new(),
            cargo,
            start_time,
            end_time: start_time + duration,
            status: AuctionStatus::Active,
            bids: Vec::new(),
            winning_bid: None,
            current_lowest_bid: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AuctionStatus::Active
    }

    /// Whether the bidding window has elapsed (independent of `status` —
    /// the reconciliation sweep uses this to find auctions the timer missed).
    #[must_use]
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }

    /// Reverse-auction acceptance rule: strictly below the current lowest,
    /// or no prior bid exists.
    #[must_use]
    pub fn undercuts(&self, amount: Decimal) -> bool {
        match self.current_lowest_bid {
            Some(lowest) => amount < lowest,
            None => true,
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Auction {
    #[must_use]
    pub fn dummy_active() -> Self {
        Self::open(
            CargoId::new(),
            Utc::now(),
            std::time::Duration::from_secs(300),
        )
    }
}
