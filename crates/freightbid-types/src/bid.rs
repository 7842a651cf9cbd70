//! Bid types.
//!
//! Bids are immutable once created: never edited or deleted, only superseded
//! by a lower subsequent bid. Winner selection re-derives the minimum over
//! all bids, with ties broken by earliest creation time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, BidId, UserId};

/// One competitive offer to carry a cargo, in the auction's currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub auction: AuctionId,
    pub bidder: UserId,
    /// Strictly positive; validated before persistence.
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Bid {
    #[must_use]
    pub fn new(auction: AuctionId, bidder: UserId, amount: Decimal, now: DateTime<Utc>) -> Self {
        Self {
            id: BidId::new(),
            auction,
            bidder,
            amount,
            created_at: now,
        }
    }

    /// Winner comparator: lowest amount first, earliest creation breaks ties.
    #[must_use]
    pub fn beats(&self, other: &Self) -> bool {
        (self.amount, self.created_at) < (other.amount, other.created_at)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Bid {
    #[must_use]
    pub fn dummy(auction: AuctionId, amount: Decimal) -> Self {
        Self::new(auction, UserId::new(), amount, Utc::now())
    }
}
