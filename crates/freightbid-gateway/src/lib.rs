//! # freightbid-gateway
//!
//! **Cargo Listing Gateway**: turns a cargo-creation request from an
//! authenticated identity into a persisted Cargo record and triggers the
//! auction engine. Mostly glue; it exists for the trigger contract and for
//! holding the system's capability checks in one place.
//!
//! Exposed operations, as the client views consume them:
//! - create cargo (→ starts the auction) — cargo owners
//! - list own cargo — cargo owners
//! - list active auctions — truck owners
//! - get one auction with bid history — any identity
//! - place bid — truck owners

pub mod gateway;
pub mod validation;

pub use gateway::ListingGateway;
pub use validation::validate_draft;
