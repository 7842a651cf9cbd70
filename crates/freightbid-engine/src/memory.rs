//! In-memory [`RecordStore`] implementation.
//!
//! The default store for a single-process deployment and the workhorse of
//! the test suites. All record maps live behind one mutex, which makes the
//! `commit_*` operations genuinely atomic: either both records land or
//! neither does.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use freightbid_types::{
    Auction, AuctionId, AuctionStatus, Bid, BidId, Cargo, CargoId, FreightbidError, Result, UserId,
};

use crate::store::RecordStore;

#[derive(Default)]
struct Records {
    cargo: HashMap<CargoId, Cargo>,
    auctions: HashMap<AuctionId, Auction>,
    bids: HashMap<BidId, Bid>,
    /// Uniqueness index: which auction owns each cargo.
    auction_by_cargo: HashMap<CargoId, AuctionId>,
}

/// Thread-safe in-memory record store.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn save_auction_locked(records: &mut Records, auction: &Auction) -> Result<()> {
        if let Some(existing) = records.auction_by_cargo.get(&auction.cargo) {
            if *existing != auction.id {
                return Err(FreightbidError::CargoAlreadyAuctioned(auction.cargo));
            }
        }
        records.auction_by_cargo.insert(auction.cargo, auction.id);
        records.auctions.insert(auction.id, auction.clone());
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn load_cargo(&self, id: CargoId) -> Result<Cargo> {
        self.lock()
            .cargo
            .get(&id)
            .cloned()
            .ok_or(FreightbidError::CargoNotFound(id))
    }

    fn save_cargo(&self, cargo: &Cargo) -> Result<()> {
        self.lock().cargo.insert(cargo.id, cargo.clone());
        Ok(())
    }

    fn load_auction(&self, id: AuctionId) -> Result<Auction> {
        self.lock()
            .auctions
            .get(&id)
            .cloned()
            .ok_or(FreightbidError::AuctionNotFound(id))
    }

    fn save_auction(&self, auction: &Auction) -> Result<()> {
        Self::save_auction_locked(&mut self.lock(), auction)
    }

    fn load_bid(&self, id: BidId) -> Result<Bid> {
        self.lock()
            .bids
            .get(&id)
            .cloned()
            .ok_or(FreightbidError::BidNotFound(id))
    }

    fn save_bid(&self, bid: &Bid) -> Result<()> {
        self.lock().bids.insert(bid.id, bid.clone());
        Ok(())
    }

    fn find_bids_by_auction(&self, auction: AuctionId) -> Result<Vec<Bid>> {
        let records = self.lock();
        let mut bids: Vec<Bid> = records
            .bids
            .values()
            .filter(|b| b.auction == auction)
            .cloned()
            .collect();
        bids.sort_by_key(|b| (b.created_at, b.id));
        Ok(bids)
    }

    fn find_active_auctions(&self) -> Result<Vec<Auction>> {
        let records = self.lock();
        let mut auctions: Vec<Auction> = records
            .auctions
            .values()
            .filter(|a| a.status == AuctionStatus::Active)
            .cloned()
            .collect();
        auctions.sort_by_key(|a| (a.start_time, a.id));
        Ok(auctions)
    }

    fn find_cargo_by_owner(&self, owner: UserId) -> Result<Vec<Cargo>> {
        let records = self.lock();
        let mut listings: Vec<Cargo> = records
            .cargo
            .values()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        listings.sort_by_key(|c| std::cmp::Reverse((c.created_at, c.id)));
        Ok(listings)
    }

    fn commit_bid(&self, bid: &Bid, auction: &Auction) -> Result<()> {
        let mut records = self.lock();
        Self::save_auction_locked(&mut records, auction)?;
        records.bids.insert(bid.id, bid.clone());
        Ok(())
    }

    fn commit_settlement(&self, auction: &Auction, cargo: &Cargo) -> Result<()> {
        let mut records = self.lock();
        Self::save_auction_locked(&mut records, auction)?;
        if cargo.auction.is_none() {
            // Link cleared (zero-bid settlement): release the uniqueness
            // slot so the cargo can be auctioned again.
            records.auction_by_cargo.remove(&cargo.id);
        }
        records.cargo.insert(cargo.id, cargo.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::time::Duration;

    #[test]
    fn load_missing_cargo_fails() {
        let store = MemoryStore::new();
        let id = CargoId::new();
        let err = store.load_cargo(id).unwrap_err();
        assert!(matches!(err, FreightbidError::CargoNotFound(got) if got == id));
    }

    #[test]
    fn cargo_roundtrip() {
        let store = MemoryStore::new();
        let cargo = Cargo::dummy_for_owner(UserId::new());
        store.save_cargo(&cargo).unwrap();
        let back = store.load_cargo(cargo.id).unwrap();
        assert_eq!(back.description, cargo.description);
    }

    #[test]
    fn second_auction_for_same_cargo_rejected() {
        let store = MemoryStore::new();
        let cargo_id = CargoId::new();
        let first = Auction::open(cargo_id, Utc::now(), Duration::from_secs(300));
        let second = Auction::open(cargo_id, Utc::now(), Duration::from_secs(300));

        store.save_auction(&first).unwrap();
        let err = store.save_auction(&second).unwrap_err();
        assert!(matches!(err, FreightbidError::CargoAlreadyAuctioned(got) if got == cargo_id));
    }

    #[test]
    fn updating_same_auction_is_allowed() {
        let store = MemoryStore::new();
        let mut auction = Auction::dummy_active();
        store.save_auction(&auction).unwrap();

        auction.current_lowest_bid = Some(Decimal::new(80, 0));
        store.save_auction(&auction).unwrap();

        let back = store.load_auction(auction.id).unwrap();
        assert_eq!(back.current_lowest_bid, Some(Decimal::new(80, 0)));
    }

    #[test]
    fn bids_sorted_by_creation_time() {
        let store = MemoryStore::new();
        let auction = AuctionId::new();
        let now = Utc::now();
        let late = Bid::new(auction, UserId::new(), Decimal::new(60, 0), now + Duration::from_secs(2));
        let early = Bid::new(auction, UserId::new(), Decimal::new(100, 0), now);
        store.save_bid(&late).unwrap();
        store.save_bid(&early).unwrap();
        // A bid for another auction must not leak in.
        store
            .save_bid(&Bid::dummy(AuctionId::new(), Decimal::new(10, 0)))
            .unwrap();

        let bids = store.find_bids_by_auction(auction).unwrap();
        assert_eq!(bids.len(), 2);
        assert_eq!(bids[0].id, early.id);
        assert_eq!(bids[1].id, late.id);
    }

    #[test]
    fn active_auctions_sorted_by_start_time() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let later = Auction::open(CargoId::new(), now + Duration::from_secs(60), Duration::from_secs(300));
        let mut finished = Auction::open(CargoId::new(), now, Duration::from_secs(300));
        finished.status = AuctionStatus::Finished;
        let earlier = Auction::open(CargoId::new(), now, Duration::from_secs(300));

        store.save_auction(&later).unwrap();
        store.save_auction(&finished).unwrap();
        store.save_auction(&earlier).unwrap();

        let active = store.find_active_auctions().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].id, earlier.id);
        assert_eq!(active[1].id, later.id);
    }

    #[test]
    fn cargo_by_owner_newest_first() {
        let store = MemoryStore::new();
        let owner = UserId::new();
        let mut first = Cargo::dummy_for_owner(owner);
        let mut second = Cargo::dummy_for_owner(owner);
        let now = Utc::now();
        first.created_at = now;
        second.created_at = now + Duration::from_secs(1);
        store.save_cargo(&first).unwrap();
        store.save_cargo(&second).unwrap();
        store.save_cargo(&Cargo::dummy_for_owner(UserId::new())).unwrap();

        let listings = store.find_cargo_by_owner(owner).unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].id, second.id);
        assert_eq!(listings[1].id, first.id);
    }

    #[test]
    fn settlement_with_cleared_link_releases_the_cargo() {
        let store = MemoryStore::new();
        let mut cargo = Cargo::dummy_for_owner(UserId::new());
        let mut auction = Auction::open(cargo.id, Utc::now(), Duration::from_secs(300));
        cargo.auction = Some(auction.id);
        store.save_cargo(&cargo).unwrap();
        store.save_auction(&auction).unwrap();

        // Zero-bid settlement: the auction finishes and the cargo link is
        // cleared, which must release the uniqueness hold.
        auction.status = AuctionStatus::Finished;
        cargo.auction = None;
        store.commit_settlement(&auction, &cargo).unwrap();

        let relisted = Auction::open(cargo.id, Utc::now(), Duration::from_secs(300));
        store.save_auction(&relisted).unwrap();
        assert_eq!(store.load_auction(relisted.id).unwrap().cargo, cargo.id);
    }

    #[test]
    fn settlement_with_live_link_keeps_the_hold() {
        let store = MemoryStore::new();
        let mut cargo = Cargo::dummy_for_owner(UserId::new());
        let mut auction = Auction::open(cargo.id, Utc::now(), Duration::from_secs(300));
        cargo.auction = Some(auction.id);
        store.save_cargo(&cargo).unwrap();
        store.save_auction(&auction).unwrap();

        auction.status = AuctionStatus::Finished;
        store.commit_settlement(&auction, &cargo).unwrap();

        let second = Auction::open(cargo.id, Utc::now(), Duration::from_secs(300));
        let err = store.save_auction(&second).unwrap_err();
        assert!(matches!(err, FreightbidError::CargoAlreadyAuctioned(got) if got == cargo.id));
    }

    #[test]
    fn commit_bid_writes_both_records() {
        let store = MemoryStore::new();
        let mut auction = Auction::dummy_active();
        store.save_auction(&auction).unwrap();

        let bid = Bid::dummy(auction.id, Decimal::new(90, 0));
        auction.bids.push(bid.id);
        auction.current_lowest_bid = Some(bid.amount);
        store.commit_bid(&bid, &auction).unwrap();

        assert_eq!(store.load_bid(bid.id).unwrap().amount, bid.amount);
        let back = store.load_auction(auction.id).unwrap();
        assert_eq!(back.bids, vec![bid.id]);
    }
}
