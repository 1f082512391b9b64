//! Trade lifecycle: opening a position and requesting a manual close.

use super::core::Engine;
use super::results::EngineError;
use crate::events::{EventPayload, TradeClosedEvent, TradeOpenedEvent};
use crate::trade::Trade;
use crate::types::{AccountId, Leverage, Price, Quote, Side, TradeId};

impl Engine {
    /// Open a leveraged position. The margin is checked against the balance
    /// but stays in it: it scales the PnL and nothing else. Take-profit and
    /// stop-loss are stored as given, even on the wrong side of the entry
    /// price; threshold placement is the caller's responsibility.
    pub fn open_trade(
        &mut self,
        caller: AccountId,
        side: Side,
        margin: Quote,
        leverage: u32,
        entry_price: Price,
        take_profit: Price,
        stop_loss: Price,
    ) -> Result<TradeId, EngineError> {
        let balance = match self.accounts.get(&caller) {
            Some(account) if account.is_registered() => account.balance,
            _ => return Err(EngineError::NotRegistered(caller)),
        };

        if self.ledger.has_active(caller) {
            return Err(EngineError::TradeAlreadyActive(caller));
        }

        if margin.is_zero() || margin > balance {
            return Err(EngineError::InvalidMargin {
                requested: margin,
                balance,
            });
        }

        let leverage = Leverage::new(leverage).ok_or(EngineError::InvalidLeverage(leverage))?;

        // all preconditions hold; the counter only advances on success
        let trade_id = self.ledger.next_id();
        let trade = Trade {
            id: trade_id,
            side,
            entry_price,
            take_profit,
            stop_loss,
            margin,
            leverage,
            manual_close_requested: false,
            opened_at: self.current_time,
        };
        self.ledger.insert(caller, trade);

        self.emit_event(EventPayload::TradeOpened(TradeOpenedEvent {
            account_id: caller,
            trade_id,
            side,
            entry_price,
            leverage,
        }));

        Ok(trade_id)
    }

    /// Flag the caller's open trade for manual closure. The trade stays open
    /// and keeps moving with the market until the price authority next
    /// pushes a price for this account.
    pub fn close_trade(&mut self, caller: AccountId) -> Result<(), EngineError> {
        let trade = self
            .ledger
            .get_mut(caller)
            .ok_or(EngineError::NoActiveTrade(caller))?;

        if trade.manual_close_requested {
            return Err(EngineError::CloseAlreadyRequested(caller));
        }

        trade.manual_close_requested = true;
        let trade_id = trade.id;

        self.emit_event(EventPayload::TradeClosed(TradeClosedEvent {
            account_id: caller,
            trade_id,
            reason: "Manual close requested".to_string(),
        }));

        Ok(())
    }
}
