//! Configuration types for the auction engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Timing configuration for the auction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Length of the bidding window. `end_time = start_time + auction_duration`.
    pub auction_duration: Duration,
    /// Interval of the reconciliation sweep that settles auctions whose
    /// expiry timer was lost (process restart, failed store write).
    pub sweep_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auction_duration: Duration::from_secs(constants::DEFAULT_AUCTION_DURATION_SECS),
            sweep_interval: Duration::from_secs(constants::DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}
