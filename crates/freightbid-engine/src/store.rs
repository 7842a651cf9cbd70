//! The record-store seam.
//!
//! The engine never talks to a database directly; it consumes this narrow
//! persistence interface. A store failure surfaces as
//! [`FreightbidError::StoreUnavailable`] — transient, not retried here,
//! since retry policy belongs to the collaborator behind the seam.

use freightbid_types::{Auction, AuctionId, Bid, BidId, Cargo, CargoId, Result, UserId};

/// Durable storage for Cargo, Auction, and Bid records.
///
/// Implementations must enforce the auction-per-cargo uniqueness invariant
/// in [`RecordStore::save_auction`]: at most one auction may hold a given
/// cargo at a time. The hold is released only by a settlement that clears
/// the cargo's auction link (zero-bid expiry).
pub trait RecordStore: Send + Sync + 'static {
    fn load_cargo(&self, id: CargoId) -> Result<Cargo>;

    /// Insert or update a cargo record.
    fn save_cargo(&self, cargo: &Cargo) -> Result<()>;

    fn load_auction(&self, id: AuctionId) -> Result<Auction>;

    /// Insert or update an auction record. Fails with
    /// [`FreightbidError::CargoAlreadyAuctioned`] if a *different* auction
    /// already references the same cargo.
    ///
    /// [`FreightbidError::CargoAlreadyAuctioned`]: freightbid_types::FreightbidError::CargoAlreadyAuctioned
    fn save_auction(&self, auction: &Auction) -> Result<()>;

    fn load_bid(&self, id: BidId) -> Result<Bid>;

    fn save_bid(&self, bid: &Bid) -> Result<()>;

    /// All bids for one auction, ordered by creation time.
    fn find_bids_by_auction(&self, auction: AuctionId) -> Result<Vec<Bid>>;

    /// All auctions currently in `Active` status, ordered by start time.
    fn find_active_auctions(&self) -> Result<Vec<Auction>>;

    /// All cargo listings owned by one user, newest first.
    fn find_cargo_by_owner(&self, owner: UserId) -> Result<Vec<Cargo>>;

    /// Persist an accepted bid together with the auction that references it.
    ///
    /// The default implementation is two writes; stores that can should
    /// override it with a single atomic update so a crash between the two
    /// cannot leave a bid dangling.
    fn commit_bid(&self, bid: &Bid, auction: &Auction) -> Result<()> {
        self.save_bid(bid)?;
        self.save_auction(auction)
    }

    /// Persist a settlement: the finished auction and its cargo's new
    /// status together. Same atomicity expectation as
    /// [`RecordStore::commit_bid`] — status + winning bid + cargo status
    /// must never be half-applied. When the cargo's auction link is `None`
    /// the store must also release its uniqueness hold so the cargo can be
    /// auctioned again.
    fn commit_settlement(&self, auction: &Auction, cargo: &Cargo) -> Result<()> {
        self.save_auction(auction)?;
        self.save_cargo(cargo)
    }
}
