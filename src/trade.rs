// 4.0: open trade tracking. one trade per account, keyed by owner.
// presence in the ledger IS the active state: settlement removes the entry,
// which frees the account to open again. ids come from a single counter
// shared by every account and are never reused.

use crate::types::{AccountId, Leverage, Price, Quote, Side, Timestamp, TradeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: TradeId,
    pub side: Side,
    pub entry_price: Price,
    pub take_profit: Price,
    pub stop_loss: Price,
    /// Notional stake scaling the PnL. Validated against the balance at open
    /// time but never deducted from it.
    pub margin: Quote,
    pub leverage: Leverage,
    pub manual_close_requested: bool,
    pub opened_at: Timestamp,
}

/// Maps each account to its single open trade and issues trade ids.
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionLedger {
    trades: HashMap<AccountId, Trade>,
    next_trade_id: u64,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self {
            trades: HashMap::new(),
            next_trade_id: 1,
        }
    }

    pub fn next_id(&mut self) -> TradeId {
        let id = TradeId(self.next_trade_id);
        self.next_trade_id += 1;
        id
    }

    /// The id the next open will receive, without issuing it.
    pub fn peek_next_id(&self) -> u64 {
        self.next_trade_id
    }

    pub fn get(&self, account: AccountId) -> Option<&Trade> {
        self.trades.get(&account)
    }

    pub fn get_mut(&mut self, account: AccountId) -> Option<&mut Trade> {
        self.trades.get_mut(&account)
    }

    pub fn has_active(&self, account: AccountId) -> bool {
        self.trades.contains_key(&account)
    }

    pub fn insert(&mut self, account: AccountId, trade: Trade) {
        debug_assert!(!self.trades.contains_key(&account));
        self.trades.insert(account, trade);
    }

    pub fn remove(&mut self, account: AccountId) -> Option<Trade> {
        self.trades.remove(&account)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, &Trade)> {
        self.trades.iter()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_trade(id: TradeId) -> Trade {
        Trade {
            id,
            side: Side::Long,
            entry_price: Price::from_units(100),
            take_profit: Price::from_units(120),
            stop_loss: Price::from_units(90),
            margin: Quote::from_units(1000),
            leverage: Leverage::new(10).unwrap(),
            manual_close_requested: false,
            opened_at: Timestamp::from_millis(0),
        }
    }

    #[test]
    fn ids_are_monotonic_across_accounts() {
        let mut ledger = PositionLedger::new();

        let a = ledger.next_id();
        let b = ledger.next_id();
        let c = ledger.next_id();

        assert_eq!(a, TradeId(1));
        assert_eq!(b, TradeId(2));
        assert_eq!(c, TradeId(3));
    }

    #[test]
    fn removal_frees_the_slot_but_not_the_id() {
        let mut ledger = PositionLedger::new();
        let owner = AccountId(7);

        let first = ledger.next_id();
        ledger.insert(owner, test_trade(first));
        assert!(ledger.has_active(owner));

        let removed = ledger.remove(owner).unwrap();
        assert_eq!(removed.id, TradeId(1));
        assert!(!ledger.has_active(owner));

        // the next id keeps counting; nothing is recycled
        let second = ledger.next_id();
        assert_eq!(second, TradeId(2));
    }

    #[test]
    fn one_trade_per_account() {
        let mut ledger = PositionLedger::new();
        let owner = AccountId(1);

        let id = ledger.next_id();
        ledger.insert(owner, test_trade(id));

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(owner).unwrap().id, id);
        assert!(ledger.get(AccountId(2)).is_none());
    }
}
