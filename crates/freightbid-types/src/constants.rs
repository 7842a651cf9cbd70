//! System-wide constants for the FreightBid marketplace core.

/// Fixed auction window in seconds (5 minutes, domain-fixed).
pub const DEFAULT_AUCTION_DURATION_SECS: u64 = 300;

/// How often the reconciliation sweep re-checks for expired-but-active
/// auctions whose settlement timer failed, in seconds.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 30;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "FreightBid";
