// 8.0.2: result types and errors for engine operations.

use crate::account::AccountError;
use crate::events::CloseReason;
use crate::math::MathError;
use crate::types::{AccountId, Pnl, Price, Quote, TradeId};

/// The outcome of a settlement: what was closed, at which price, and where
/// the balance landed.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub account_id: AccountId,
    pub trade_id: TradeId,
    pub exit_price: Price,
    pub reason: CloseReason,
    pub pnl: Pnl,
    pub new_balance: Quote,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Account {0:?} is already registered")]
    AlreadyRegistered(AccountId),

    #[error("Account {0:?} is not registered")]
    NotRegistered(AccountId),

    #[error("Account {0:?} already has an active trade")]
    TradeAlreadyActive(AccountId),

    #[error("Account {0:?} has no active trade")]
    NoActiveTrade(AccountId),

    #[error("Account {0:?} has already requested a close")]
    CloseAlreadyRequested(AccountId),

    #[error("Invalid margin: requested {requested}, balance {balance}")]
    InvalidMargin { requested: Quote, balance: Quote },

    #[error("Invalid leverage {0}: must be between 1 and 500")]
    InvalidLeverage(u32),

    #[error("Caller {0:?} is not authorized")]
    Unauthorized(AccountId),

    #[error("Math error: {0}")]
    Math(#[from] MathError),

    #[error("Account error: {0}")]
    Account(#[from] AccountError),
}
