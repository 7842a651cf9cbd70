//! Caller identity and the fixed role set.
//!
//! Authentication itself happens in the external identity service; by the
//! time a call reaches FreightBid it carries a resolved [`Identity`]. The
//! capability check is performed exactly once at the gateway boundary via
//! [`Identity::require`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FreightbidError, Result, UserId};

/// The two account types the marketplace knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Lists cargo and starts auctions.
    CargoOwner,
    /// Views active auctions and places bids.
    TruckOwner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CargoOwner => write!(f, "cargo_owner"),
            Self::TruckOwner => write!(f, "truck_owner"),
        }
    }
}

/// A resolved, pre-authenticated caller: who they are plus what they may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Capability check: fail with [`FreightbidError::Forbidden`] unless the
    /// caller holds `required`.
    pub fn require(&self, required: Role) -> Result<()> {
        if self.role == required {
            Ok(())
        } else {
            Err(FreightbidError::Forbidden {
                required,
                actual: self.role,
            })
        }
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Identity {
    #[must_use]
    pub fn dummy_cargo_owner() -> Self {
        Self::new(UserId::new(), Role::CargoOwner)
    }

    #[must_use]
    pub fn dummy_truck_owner() -> Self {
        Self::new(UserId::new(), Role::TruckOwner)
    }
}
