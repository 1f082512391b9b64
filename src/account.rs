//! Account registry and virtual balances.
//!
//! Every player holds a single unsigned balance. Registration is the only way
//! to fund it, and settlement is the only thing that moves it afterwards.
//! There is no separate "registered" flag: an account counts as registered
//! exactly while its balance is above zero, so an account wiped out by losses
//! becomes eligible to register again.

use crate::math::SCALE;
use crate::types::{AccountId, Quote, Timestamp};
use serde::{Deserialize, Serialize};

/// Stake granted on registration: 10,000 whole units.
pub const INITIAL_BALANCE: Quote = Quote::new(10_000 * SCALE);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub balance: Quote,
    pub registered_at: Timestamp,
}

impl Account {
    pub fn new(id: AccountId, timestamp: Timestamp) -> Self {
        Self {
            id,
            balance: INITIAL_BALANCE,
            registered_at: timestamp,
        }
    }

    pub fn is_registered(&self) -> bool {
        !self.balance.is_zero()
    }

    /// Add a profit to the balance. Fails only on u128 overflow.
    pub fn credit(&mut self, amount: Quote) -> Result<(), AccountError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow)?;
        Ok(())
    }

    /// Deduct a loss, clamping at zero. Losing more than the balance is not
    /// an error; the account is simply emptied.
    pub fn debit_clamped(&mut self, amount: Quote) {
        self.balance = self.balance.saturating_sub(amount);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccountError {
    #[error("balance overflow")]
    BalanceOverflow,
}
