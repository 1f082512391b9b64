//! Role assignments gating privileged operations.
//!
//! Two singleton roles. The administrator is fixed at construction and may
//! hand the price-authority role to any identity; the price authority is the
//! only caller allowed to push settlement prices. No renunciation, no
//! multi-authority.

use crate::types::AccountId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    administrator: AccountId,
    price_authority: AccountId,
}

impl Roles {
    /// The deployer becomes administrator and, initially, price authority.
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            price_authority: administrator,
        }
    }

    pub fn administrator(&self) -> AccountId {
        self.administrator
    }

    pub fn price_authority(&self) -> AccountId {
        self.price_authority
    }

    pub fn is_administrator(&self, caller: AccountId) -> bool {
        caller == self.administrator
    }

    pub fn is_price_authority(&self, caller: AccountId) -> bool {
        caller == self.price_authority
    }

    /// Unconditional reassignment; the caller check is the engine's job.
    pub fn set_price_authority(&mut self, new_authority: AccountId) {
        self.price_authority = new_authority;
    }
}
