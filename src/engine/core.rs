// 8.1 engine/core.rs: main engine struct. all state lives here.

use super::config::EngineConfig;
use super::results::EngineError;
use crate::access::Roles;
use crate::account::Account;
use crate::events::{AccountRegisteredEvent, Event, EventId, EventPayload};
use crate::trade::{PositionLedger, Trade};
use crate::types::{AccountId, Quote, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug)]
pub struct Engine {
    pub(super) config: EngineConfig,
    pub(super) accounts: HashMap<AccountId, Account>,
    pub(super) ledger: PositionLedger,
    pub(super) roles: Roles,
    pub(super) events: Vec<Event>,
    pub(super) next_event_id: u64,
    pub(super) current_time: Timestamp,
}

impl Engine {
    /// The constructing identity becomes administrator and initial price
    /// authority.
    pub fn new(config: EngineConfig, administrator: AccountId) -> Self {
        Self {
            config,
            accounts: HashMap::new(),
            ledger: PositionLedger::new(),
            roles: Roles::new(administrator),
            events: Vec::new(),
            next_event_id: 1,
            current_time: Timestamp::from_millis(0),
        }
    }

    pub fn set_time(&mut self, timestamp: Timestamp) {
        self.current_time = timestamp;
    }

    pub fn time(&self) -> Timestamp {
        self.current_time
    }

    pub fn advance_time(&mut self, millis: i64) {
        self.current_time = Timestamp::from_millis(self.current_time.as_millis() + millis);
    }

    /// Grant the fixed initial balance. An account already holding a balance
    /// cannot register again; one that was wiped to zero can, and is
    /// indistinguishable from a newcomer.
    pub fn register(&mut self, caller: AccountId) -> Result<(), EngineError> {
        if let Some(existing) = self.accounts.get(&caller) {
            if existing.is_registered() {
                return Err(EngineError::AlreadyRegistered(caller));
            }
        }

        let account = Account::new(caller, self.current_time);
        let balance = account.balance;
        self.accounts.insert(caller, account);

        self.emit_event(EventPayload::AccountRegistered(AccountRegisteredEvent {
            account_id: caller,
            balance,
        }));

        Ok(())
    }

    /// Hand the price-authority role to another identity. Administrator only;
    /// the new identity is not validated in any way.
    pub fn set_price_authority(
        &mut self,
        caller: AccountId,
        new_authority: AccountId,
    ) -> Result<(), EngineError> {
        if !self.roles.is_administrator(caller) {
            return Err(EngineError::Unauthorized(caller));
        }
        self.roles.set_price_authority(new_authority);
        Ok(())
    }

    pub fn get_account(&self, account_id: AccountId) -> Option<&Account> {
        self.accounts.get(&account_id)
    }

    pub fn balance(&self, account_id: AccountId) -> Quote {
        self.accounts
            .get(&account_id)
            .map(|a| a.balance)
            .unwrap_or(Quote::zero())
    }

    pub fn accounts_iter(&self) -> impl Iterator<Item = (&AccountId, &Account)> {
        self.accounts.iter()
    }

    pub fn get_trade(&self, account_id: AccountId) -> Option<&Trade> {
        self.ledger.get(account_id)
    }

    pub fn open_trade_count(&self) -> usize {
        self.ledger.len()
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn recent_events(&self, count: usize) -> &[Event] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The entire durable state surface, in key order.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            balances: self.accounts.iter().map(|(id, a)| (*id, a.balance)).collect(),
            trades: self.ledger.iter().map(|(id, t)| (*id, t.clone())).collect(),
            next_trade_id: self.ledger.peek_next_id(),
            roles: self.roles,
        }
    }

    pub(super) fn emit_event(&mut self, payload: EventPayload) {
        let event = Event::new(EventId(self.next_event_id), self.current_time, payload);
        self.next_event_id += 1;

        if self.config.verbose {
            println!("[Event {}] {:?}", event.id.0, event.payload);
        }

        self.events.push(event);

        if self.events.len() > self.config.max_events {
            let drain_count = self.events.len() - self.config.max_events;
            self.events.drain(0..drain_count);
        }
    }
}

/// Serializable copy of everything the engine persists: per-identity balance,
/// per-identity open trade, the id counter, and the two roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub balances: BTreeMap<AccountId, Quote>,
    pub trades: BTreeMap<AccountId, Trade>,
    pub next_trade_id: u64,
    pub roles: Roles,
}
