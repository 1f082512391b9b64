// 7.0: every state change produces an event. used for audit trails, state
// reconstruction, and notifying external consumers. the EventPayload enum
// lists all event types.

use crate::types::{AccountId, Leverage, Pnl, Price, Quote, Side, Timestamp, TradeId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: Timestamp,
    pub payload: EventPayload,
}

impl Event {
    pub fn new(id: EventId, timestamp: Timestamp, payload: EventPayload) -> Self {
        Self {
            id,
            timestamp,
            payload,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    AccountRegistered(AccountRegisteredEvent),
    TradeOpened(TradeOpenedEvent),
    TradeClosed(TradeClosedEvent),
    TradeResolved(TradeResolvedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRegisteredEvent {
    pub account_id: AccountId,
    pub balance: Quote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeOpenedEvent {
    pub account_id: AccountId,
    pub trade_id: TradeId,
    pub side: Side,
    pub entry_price: Price,
    pub leverage: Leverage,
}

/// A manual-close request was recorded. The position stays open until the
/// price authority next resolves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeClosedEvent {
    pub account_id: AccountId,
    pub trade_id: TradeId,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeResolvedEvent {
    pub account_id: AccountId,
    pub trade_id: TradeId,
    pub pnl: Pnl,
    pub new_balance: Quote,
}

// 7.1: why a settlement happened. manual close always wins over TP/SL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    TakeProfit,
    StopLoss,
    ManualClose,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CloseReason::TakeProfit => "Take Profit",
            CloseReason::StopLoss => "Stop Loss",
            CloseReason::ManualClose => "Manual Close",
        };
        write!(f, "{label}")
    }
}
