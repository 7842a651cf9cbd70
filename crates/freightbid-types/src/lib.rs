//! # freightbid-types
//!
//! Shared types, errors, and configuration for the **FreightBid** freight
//! marketplace core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`CargoId`], [`AuctionId`], [`BidId`], [`UserId`]
//! - **Cargo model**: [`Cargo`], [`CargoDraft`], [`CargoStatus`]
//! - **Auction model**: [`Auction`], [`AuctionStatus`]
//! - **Bid model**: [`Bid`]
//! - **Identity model**: [`Identity`], [`Role`]
//! - **Event model**: [`AuctionEvent`], [`Scope`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`FreightbidError`] with `FB_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod auction;
pub mod bid;
pub mod cargo;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod identity;
pub mod ids;

// Re-export all primary types at crate root for ergonomic imports:
//   use freightbid_types::{Auction, Bid, Cargo, Identity, ...};

pub use auction::*;
pub use bid::*;
pub use cargo::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use ids::*;

// Constants are accessed via `freightbid_types::constants::FOO`
// (not re-exported to avoid name collisions).
