//! Cargo draft validation.
//!
//! Every failure is reported as [`FreightbidError::Validation`] with the
//! first offending field named, before anything touches the store.

use rust_decimal::Decimal;

use freightbid_types::{CargoDraft, FreightbidError, Result};

fn fail(reason: &str) -> FreightbidError {
    FreightbidError::Validation {
        reason: reason.to_string(),
    }
}

/// Check a cargo-creation request for absent or malformed fields.
pub fn validate_draft(draft: &CargoDraft) -> Result<()> {
    if draft.description.trim().is_empty() {
        return Err(fail("description must not be empty"));
    }
    if draft.weight <= Decimal::ZERO {
        return Err(fail("weight must be positive"));
    }
    if draft.pickup_location.trim().is_empty() {
        return Err(fail("pickup location must not be empty"));
    }
    if draft.destination.trim().is_empty() {
        return Err(fail("destination must not be empty"));
    }
    Ok(())
}
