//! State-change events pushed through the notification fan-out.
//!
//! Each event knows its delivery [`Scope`]: `auction-started` is broadcast
//! globally (truck owners watch for new work before subscribing to any one
//! auction), while `update-bid` and `auction-ended` go only to the
//! subscriber group of the auction they concern.

use serde::{Deserialize, Serialize};

use crate::{Auction, AuctionId, Bid};

/// Where an event is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Every connected client.
    Global,
    /// Only clients subscribed to this auction.
    Auction(AuctionId),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Auction(id) => write!(f, "{id}"),
        }
    }
}

/// A state-change notification, tagged with its wire name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum AuctionEvent {
    /// A new auction opened. Payload: the fresh auction.
    AuctionStarted { auction: Auction },
    /// A bid was accepted. Payload: the new record-low bid.
    UpdateBid { bid: Bid },
    /// The auction settled. Payload: the finalized auction (winning bid set
    /// if any bids were placed).
    AuctionEnded { auction: Auction },
}

impl AuctionEvent {
    /// The wire-level event name, as clients subscribe to it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuctionStarted { .. } => "auction-started",
            Self::UpdateBid { .. } => "update-bid",
            Self::AuctionEnded { .. } => "auction-ended",
        }
    }

    /// The delivery scope of this event.
    #[must_use]
    pub fn scope(&self) -> Scope {
        match self {
            Self::AuctionStarted { .. } => Scope::Global,
            Self::UpdateBid { bid } => Scope::Auction(bid.auction),
            Self::AuctionEnded { auction } => Scope::Auction(auction.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn auction_started_is_global() {
        let event = AuctionEvent::AuctionStarted {
            auction: Auction::dummy_active(),
        };
        assert_eq!(event.scope(), Scope::Global);
        assert_eq!(event.name(), "auction-started");
    }

    #[test]
    fn bid_and_ended_are_auction_scoped() {
        let auction = Auction::dummy_active();
        let bid = Bid::dummy(auction.id, Decimal::new(100, 0));

        let event = AuctionEvent::UpdateBid { bid };
        assert_eq!(event.scope(), Scope::Auction(auction.id));
        assert_eq!(event.name(), "update-bid");

        let event = AuctionEvent::AuctionEnded {
            auction: auction.clone(),
        };
        assert_eq!(event.scope(), Scope::Auction(auction.id));
        assert_eq!(event.name(), "auction-ended");
    }

    #[test]
    fn wire_tag_matches_name() {
        let event = AuctionEvent::AuctionStarted {
            auction: Auction::dummy_active(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "auction-started");
        assert!(json["payload"]["auction"].is_object());
    }
}
