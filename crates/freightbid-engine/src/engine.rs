//! The auction engine: lifecycle operations and settlement policy.
//!
//! State machine per auction: **Active → Finished** (one-way, terminal).
//! The transition happens exactly once, triggered by the expiry timer, the
//! reconciliation sweep, or an administrative call — whichever reaches the
//! per-auction lock first. Bids race the timer by design and lose cleanly:
//! once `Finished` is committed, any later bid fails `AuctionNotActive`.
//!
//! Events are published after the state mutation commits, outside the
//! critical section, so subscribers never observe an event before the
//! underlying state is queryable.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use freightbid_notify::EventBus;
use freightbid_types::{
    Auction, AuctionEvent, AuctionId, AuctionStatus, Bid, Cargo, CargoId, CargoStatus,
    EngineConfig, FreightbidError, Result, UserId,
};

use crate::{locks::AuctionLocks, scheduler::SettlementScheduler, store::RecordStore};

/// An active auction with its cargo summary embedded, as the listing view
/// consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveAuction {
    pub auction: Auction,
    pub cargo: Cargo,
}

/// One auction with its cargo and full bid history, as the detail view
/// consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionDetail {
    pub auction: Auction,
    pub cargo: Cargo,
    pub bids: Vec<Bid>,
}

/// The auction engine. Owns state transitions, bid acceptance policy, and
/// timer-driven settlement; persists through the [`RecordStore`] seam and
/// announces through the injected [`EventBus`].
pub struct AuctionEngine<S: RecordStore> {
    store: Arc<S>,
    bus: EventBus,
    config: EngineConfig,
    locks: AuctionLocks,
    scheduler: SettlementScheduler,
}

impl<S: RecordStore> AuctionEngine<S> {
    #[must_use]
    pub fn new(store: Arc<S>, bus: EventBus, config: EngineConfig) -> Arc<Self> {
        Arc::new(Self {
            store,
            bus,
            config,
            locks: AuctionLocks::new(),
            scheduler: SettlementScheduler::new(),
        })
    }

    #[must_use]
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Open an auction for a cargo listing.
    ///
    /// Preconditions: the cargo exists and has no auction yet (1:1
    /// invariant, enforced again by the store). Effects: persists an
    /// `Active` auction with `end_time = now + auction_duration`, links it
    /// to the cargo, moves the cargo to `Active`, schedules the settlement
    /// timer, and broadcasts `auction-started` globally.
    pub async fn create_auction(self: &Arc<Self>, cargo_id: CargoId) -> Result<Auction> {
        let now = Utc::now();
        let mut cargo = self.store.load_cargo(cargo_id)?;
        if cargo.auction.is_some() {
            return Err(FreightbidError::CargoAlreadyAuctioned(cargo_id));
        }

        let auction = Auction::open(cargo_id, now, self.config.auction_duration);
        self.store.save_auction(&auction)?;

        cargo.status = CargoStatus::Active;
        cargo.auction = Some(auction.id);
        cargo.updated_at = now;
        self.store.save_cargo(&cargo)?;

        self.schedule_settlement(auction.id);
        tracing::info!(
            auction = %auction.id,
            cargo = %cargo_id,
            end_time = %auction.end_time,
            "auction opened"
        );

        self.bus.publish(&AuctionEvent::AuctionStarted {
            auction: auction.clone(),
        });
        Ok(auction)
    }

    /// Place a competitive bid.
    ///
    /// Accepted only while the auction is `Active` and the amount strictly
    /// undercuts the current lowest bid (or no bid exists yet). The whole
    /// check-then-act runs under the auction's lock; rejection leaves no
    /// state change behind.
    pub async fn place_bid(
        &self,
        auction_id: AuctionId,
        bidder: UserId,
        amount: Decimal,
    ) -> Result<Bid> {
        if amount <= Decimal::ZERO {
            return Err(FreightbidError::InvalidBidAmount { amount });
        }

        let guard = self.locks.acquire(auction_id).await;

        let mut auction = self.store.load_auction(auction_id)?;
        if !auction.is_active() {
            return Err(FreightbidError::AuctionNotActive(auction_id));
        }
        if let Some(current_lowest) = auction.current_lowest_bid {
            if !auction.undercuts(amount) {
                tracing::debug!(
                    auction = %auction_id,
                    offered = %amount,
                    %current_lowest,
                    "bid rejected: does not undercut"
                );
                return Err(FreightbidError::BidTooHigh {
                    offered: amount,
                    current_lowest,
                });
            }
        }

        let bid = Bid::new(auction_id, bidder, amount, Utc::now());
        auction.bids.push(bid.id);
        auction.current_lowest_bid = Some(amount);
        self.store.commit_bid(&bid, &auction)?;
        drop(guard);

        tracing::info!(auction = %auction_id, bid = %bid.id, %amount, "bid accepted");
        self.bus
            .publish(&AuctionEvent::UpdateBid { bid: bid.clone() });
        Ok(bid)
    }

    /// Settle an auction: select the winner and close it.
    ///
    /// Idempotent — a second call on a `Finished` auction returns it
    /// unchanged and re-emits nothing. The winner is re-derived as the
    /// minimum amount over all persisted bids (earliest creation breaks
    /// ties), not merely the last accepted one, so a settlement after any
    /// inconsistency still lands on the true low.
    pub async fn settle_auction(&self, auction_id: AuctionId) -> Result<Auction> {
        let guard = self.locks.acquire(auction_id).await;

        let mut auction = self.store.load_auction(auction_id)?;
        if !auction.is_active() {
            self.scheduler.cancel(auction_id);
            return Ok(auction);
        }

        let bids = self.store.find_bids_by_auction(auction_id)?;
        let mut winner: Option<&Bid> = None;
        for bid in &bids {
            let better = match winner {
                Some(best) => bid.beats(best),
                None => true,
            };
            if better {
                winner = Some(bid);
            }
        }

        auction.status = AuctionStatus::Finished;
        auction.winning_bid = winner.map(|b| b.id);

        let mut cargo = self.store.load_cargo(auction.cargo)?;
        if winner.is_some() {
            cargo.status = CargoStatus::Awarded;
        } else {
            // Zero bids: revert to Pending and clear the auction link so
            // the owner can relist.
            cargo.status = CargoStatus::Pending;
            cargo.auction = None;
        }
        cargo.updated_at = Utc::now();

        self.store.commit_settlement(&auction, &cargo)?;
        self.scheduler.cancel(auction_id);
        drop(guard);
        self.locks.discard(auction_id);

        tracing::info!(
            auction = %auction_id,
            winning_bid = ?auction.winning_bid,
            bid_count = bids.len(),
            "auction settled"
        );
        self.bus.publish(&AuctionEvent::AuctionEnded {
            auction: auction.clone(),
        });
        Ok(auction)
    }

    /// Pure read: one auction with cargo and full bid history.
    pub fn get_auction(&self, auction_id: AuctionId) -> Result<AuctionDetail> {
        let auction = self.store.load_auction(auction_id)?;
        let cargo = self.store.load_cargo(auction.cargo)?;
        let bids = self.store.find_bids_by_auction(auction_id)?;
        Ok(AuctionDetail {
            auction,
            cargo,
            bids,
        })
    }

    /// Pure read: all `Active` auctions with cargo summaries, ordered by
    /// start time.
    pub fn list_active_auctions(&self) -> Result<Vec<ActiveAuction>> {
        self.store
            .find_active_auctions()?
            .into_iter()
            .map(|auction| {
                let cargo = self.store.load_cargo(auction.cargo)?;
                Ok(ActiveAuction { auction, cargo })
            })
            .collect()
    }

    /// Reconciliation sweep: settle every expired-but-`Active` auction.
    ///
    /// Covers timers lost to a failed store write or a process restart; a
    /// failed settlement stays `Active` in the store and is retried on the
    /// next pass. Returns how many auctions were settled.
    pub async fn settle_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut settled = 0;
        for auction in self.store.find_active_auctions()? {
            if !auction.has_expired(now) {
                continue;
            }
            match self.settle_auction(auction.id).await {
                Ok(_) => settled += 1,
                Err(err) => {
                    tracing::warn!(auction = %auction.id, %err, "reconciliation settlement failed");
                }
            }
        }
        Ok(settled)
    }

    /// Spawn the periodic reconciliation sweep. The task runs until the
    /// handle is aborted or the runtime shuts down.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(engine.config.sweep_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = engine.settle_expired().await {
                    tracing::warn!(%err, "reconciliation sweep failed");
                }
            }
        })
    }

    fn schedule_settlement(self: &Arc<Self>, auction_id: AuctionId) {
        let engine = Arc::clone(self);
        self.scheduler
            .schedule(auction_id, self.config.auction_duration, async move {
                if let Err(err) = engine.settle_auction(auction_id).await {
                    // The store stays authoritative: nothing was marked
                    // settled in memory, the sweep retries.
                    tracing::error!(auction = %auction_id, %err, "timer-driven settlement failed");
                }
            });
    }
}
