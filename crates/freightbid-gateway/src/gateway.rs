//! The listing gateway: the boundary between resolved identities and the
//! auction engine.
//!
//! Capability checks happen here, exactly once per call; the engine trusts
//! what it is handed. Listing a cargo immediately starts its auction — the
//! trigger contract this crate exists for.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use freightbid_engine::{ActiveAuction, AuctionDetail, AuctionEngine, RecordStore};
use freightbid_types::{AuctionId, Bid, Cargo, CargoDraft, Identity, Result, Role};

use crate::validation::validate_draft;

/// Thin boundary over the engine, holding the only role checks in the
/// system.
pub struct ListingGateway<S: RecordStore> {
    engine: Arc<AuctionEngine<S>>,
}

impl<S: RecordStore> ListingGateway<S> {
    #[must_use]
    pub fn new(engine: Arc<AuctionEngine<S>>) -> Self {
        Self { engine }
    }

    #[must_use]
    pub fn engine(&self) -> &Arc<AuctionEngine<S>> {
        &self.engine
    }

    /// Create a cargo listing and start its auction.
    ///
    /// Cargo owners only. The draft is validated before anything persists;
    /// the returned record already carries the auction link and `Active`
    /// status.
    pub async fn create_cargo(&self, identity: &Identity, draft: CargoDraft) -> Result<Cargo> {
        identity.require(Role::CargoOwner)?;
        validate_draft(&draft)?;

        let cargo = Cargo::from_draft(identity.user_id, draft, Utc::now());
        self.engine.store().save_cargo(&cargo)?;
        tracing::info!(cargo = %cargo.id, owner = %identity.user_id, "cargo listed");

        self.engine.create_auction(cargo.id).await?;
        self.engine.store().load_cargo(cargo.id)
    }

    /// The caller's own cargo listings, newest first. Cargo owners only.
    pub fn my_cargo(&self, identity: &Identity) -> Result<Vec<Cargo>> {
        identity.require(Role::CargoOwner)?;
        self.engine.store().find_cargo_by_owner(identity.user_id)
    }

    /// All active auctions with cargo summaries. Truck owners only.
    pub fn active_auctions(&self, identity: &Identity) -> Result<Vec<ActiveAuction>> {
        identity.require(Role::TruckOwner)?;
        self.engine.list_active_auctions()
    }

    /// One auction with its full bid history. Any authenticated identity.
    pub fn auction(&self, _identity: &Identity, auction_id: AuctionId) -> Result<AuctionDetail> {
        self.engine.get_auction(auction_id)
    }

    /// Place a bid on behalf of the caller. Truck owners only.
    pub async fn place_bid(
        &self,
        identity: &Identity,
        auction_id: AuctionId,
        amount: Decimal,
    ) -> Result<Bid> {
        identity.require(Role::TruckOwner)?;
        self.engine
            .place_bid(auction_id, identity.user_id, amount)
            .await
    }
}
