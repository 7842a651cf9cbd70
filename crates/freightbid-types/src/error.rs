//! Error types for the FreightBid marketplace core.
//!
//! All errors use the `FB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Cargo errors
//! - 2xx: Auction errors
//! - 3xx: Bid errors
//! - 4xx: Identity / authorization errors
//! - 5xx: Validation errors
//! - 7xx: Record store errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AuctionId, BidId, CargoId, Role};

/// Central error enum for all FreightBid operations.
#[derive(Debug, Error)]
pub enum FreightbidError {
    // =================================================================
    // Cargo Errors (1xx)
    // =================================================================
    /// The requested cargo listing was not found.
    #[error("FB_ERR_100: Cargo not found: {0}")]
    CargoNotFound(CargoId),

    /// A second auction was requested for a cargo that already has one
    /// (the auction-per-cargo uniqueness invariant).
    #[error("FB_ERR_101: Cargo already has an auction: {0}")]
    CargoAlreadyAuctioned(CargoId),

    // =================================================================
    // Auction Errors (2xx)
    // =================================================================
    /// The requested auction was not found.
    #[error("FB_ERR_200: Auction not found: {0}")]
    AuctionNotFound(AuctionId),

    /// A bid was placed on an auction that is no longer accepting bids.
    #[error("FB_ERR_201: Auction is not active: {0}")]
    AuctionNotActive(AuctionId),

    // =================================================================
    // Bid Errors (3xx)
    // =================================================================
    /// The requested bid was not found.
    #[error("FB_ERR_300: Bid not found: {0}")]
    BidNotFound(BidId),

    /// The bid does not undercut the current lowest bid. Reverse auction:
    /// every accepted bid must be a new record low.
    #[error("FB_ERR_301: Bid too high: offered {offered}, current lowest is {current_lowest}")]
    BidTooHigh {
        offered: Decimal,
        current_lowest: Decimal,
    },

    /// The bid amount itself is unusable (zero or negative).
    #[error("FB_ERR_302: Invalid bid amount: {amount}")]
    InvalidBidAmount { amount: Decimal },

    // =================================================================
    // Identity / Authorization Errors (4xx)
    // =================================================================
    /// The caller's role does not carry the required capability.
    #[error("FB_ERR_400: Forbidden: requires {required}, caller is {actual}")]
    Forbidden { required: Role, actual: Role },

    // =================================================================
    // Validation Errors (5xx)
    // =================================================================
    /// A cargo-creation request failed field validation.
    #[error("FB_ERR_500: Validation failed: {reason}")]
    Validation { reason: String },

    // =================================================================
    // Record Store Errors (7xx)
    // =================================================================
    /// The record store is unreachable or refused the operation.
    /// Transient: the caller decides whether to retry.
    #[error("FB_ERR_700: Record store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("FB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("FB_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, missing fields, etc.).
    #[error("FB_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FreightbidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = FreightbidError::AuctionNotFound(AuctionId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("FB_ERR_200"), "Got: {msg}");
    }

    #[test]
    fn bid_too_high_display() {
        let err = FreightbidError::BidTooHigh {
            offered: Decimal::new(90, 0),
            current_lowest: Decimal::new(80, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("FB_ERR_301"));
        assert!(msg.contains("90"));
        assert!(msg.contains("80"));
    }

    #[test]
    fn forbidden_display_names_both_roles() {
        let err = FreightbidError::Forbidden {
            required: Role::CargoOwner,
            actual: Role::TruckOwner,
        };
        let msg = format!("{err}");
        assert!(msg.contains("FB_ERR_400"));
        assert!(msg.contains("cargo_owner"));
        assert!(msg.contains("truck_owner"));
    }

    #[test]
    fn all_errors_have_fb_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(FreightbidError::CargoNotFound(CargoId::new())),
            Box::new(FreightbidError::AuctionNotActive(AuctionId::new())),
            Box::new(FreightbidError::InvalidBidAmount {
                amount: Decimal::ZERO,
            }),
            Box::new(FreightbidError::Validation {
                reason: "test".into(),
            }),
            Box::new(FreightbidError::StoreUnavailable {
                reason: "test".into(),
            }),
            Box::new(FreightbidError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("FB_ERR_"),
                "Error missing FB_ERR_ prefix: {msg}"
            );
        }
    }
}
