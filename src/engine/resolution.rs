//! Price-driven settlement.

use super::core::Engine;
use super::results::{EngineError, Settlement};
use crate::events::{EventPayload, TradeResolvedEvent};
use crate::settlement::{compute_pnl, evaluate_exit};
use crate::types::{AccountId, Price};

impl Engine {
    /// Feed a price update for one account's open trade. Price authority
    /// only. Returns `Ok(None)` when nothing triggers: the price sits
    /// strictly between the thresholds and no manual close is pending, so
    /// the trade is left exactly as it was and no event is emitted.
    ///
    /// A settlement is all-or-nothing. The PnL chain runs before any state
    /// is touched, so a rejected computation (overflow) leaves the trade
    /// open and the balance unchanged.
    pub fn resolve(
        &mut self,
        caller: AccountId,
        target: AccountId,
        current_price: Price,
    ) -> Result<Option<Settlement>, EngineError> {
        if !self.roles.is_price_authority(caller) {
            return Err(EngineError::Unauthorized(caller));
        }

        let trade = self
            .ledger
            .get(target)
            .ok_or(EngineError::NoActiveTrade(target))?;

        let Some((exit_price, reason)) = evaluate_exit(trade, current_price) else {
            return Ok(None);
        };

        let pnl = compute_pnl(trade, exit_price)?;
        let trade_id = trade.id;

        // commit point. the credit is the one remaining fallible step and it
        // either applies fully or not at all.
        let account = self.accounts.get_mut(&target).unwrap();
        if pnl.is_profit() {
            account.credit(pnl.magnitude())?;
        } else {
            account.debit_clamped(pnl.magnitude());
        }
        let new_balance = account.balance;

        self.ledger.remove(target);

        self.emit_event(EventPayload::TradeResolved(TradeResolvedEvent {
            account_id: target,
            trade_id,
            pnl,
            new_balance,
        }));

        Ok(Some(Settlement {
            account_id: target,
            trade_id,
            exit_price,
            reason,
            pnl,
            new_balance,
        }))
    }
}
