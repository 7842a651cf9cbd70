//! Cargo listing types.
//!
//! A cargo record is created by the listing gateway in `Pending` status.
//! From then on only the auction engine mutates it: `Pending → Active` when
//! its auction opens, `Active → Awarded` when the auction settles with a
//! winner, and back to `Pending` if the auction expires with zero bids so
//! the owner can relist.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AuctionId, CargoId, UserId};

/// Lifecycle status of a cargo listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CargoStatus {
    /// Listed but not yet under auction.
    Pending,
    /// Its auction is open for bids.
    Active,
    /// The auction settled with a winning bid.
    Awarded,
    /// The shipment was carried out. Set by ops tooling, never by the engine.
    Completed,
}

impl std::fmt::Display for CargoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Awarded => write!(f, "AWARDED"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// A freight listing: what is shipped, from where to where, and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cargo {
    pub id: CargoId,
    pub owner: UserId,
    pub description: String,
    /// Shipment weight in kilograms.
    pub weight: Decimal,
    pub pickup_location: String,
    pub destination: String,
    pub pickup_date: DateTime<Utc>,
    pub status: CargoStatus,
    /// Back-reference to the live auction. Cleared again if that auction
    /// expires with zero bids, so the listing can be auctioned anew.
    pub auction: Option<AuctionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cargo {
    /// Build a fresh `Pending` cargo record from a validated draft.
    #[must_use]
    pub fn from_draft(owner: UserId, draft: CargoDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: CargoId::new(),
            owner,
            description: draft.description,
            weight: draft.weight,
            pickup_location: draft.pickup_location,
            destination: draft.destination,
            pickup_date: draft.pickup_date,
            status: CargoStatus::Pending,
            auction: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The raw fields of a cargo-creation request, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoDraft {
    pub description: String,
    pub weight: Decimal,
    pub pickup_location: String,
    pub destination: String,
    pub pickup_date: DateTime<Utc>,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl CargoDraft {
    #[must_use]
    pub fn dummy() -> Self {
        Self {
            description: "20 pallets of machine parts".to_string(),
            weight: Decimal::new(12_500, 0),
            pickup_location: "Rotterdam".to_string(),
            destination: "Munich".to_string(),
            pickup_date: Utc::now() + chrono::Duration::days(7),
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Cargo {
    #[must_use]
    pub fn dummy_for_owner(owner: UserId) -> Self {
        Self::from_draft(owner, CargoDraft::dummy(), Utc::now())
    }
}
