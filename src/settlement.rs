// 5.0: the settlement math. pure functions, no state: the engine decides when
// to call these and commits the results atomically.
//
// exit evaluation is directional (5.1), pnl is a three-step truncating chain
// (5.2): price diff, relative return against entry, then margin x leverage.
// every division truncates toward zero and every product is taken at full
// width, so results are reproducible bit for bit.

use crate::events::CloseReason;
use crate::math::{self, MathError, SCALE};
use crate::trade::Trade;
use crate::types::{Pnl, Price, Side};

// 5.1: which price the trade exits at, and why. None means no trigger fired
// and the caller must leave the trade untouched.
pub fn evaluate_exit(trade: &Trade, current_price: Price) -> Option<(Price, CloseReason)> {
    // a pending manual close settles at the pushed price no matter what the
    // thresholds say
    if trade.manual_close_requested {
        return Some((current_price, CloseReason::ManualClose));
    }

    match trade.side {
        Side::Long => {
            if current_price >= trade.take_profit {
                Some((trade.take_profit, CloseReason::TakeProfit))
            } else if current_price <= trade.stop_loss {
                Some((trade.stop_loss, CloseReason::StopLoss))
            } else {
                None
            }
        }
        Side::Short => {
            if current_price <= trade.take_profit {
                Some((trade.take_profit, CloseReason::TakeProfit))
            } else if current_price >= trade.stop_loss {
                Some((trade.stop_loss, CloseReason::StopLoss))
            } else {
                None
            }
        }
    }
}

// 5.2: pnl = (exit - entry) / entry * margin * leverage, negated for shorts.
// sign is carried separately from the magnitude so truncation of the two
// intermediate divisions is always toward zero.
pub fn compute_pnl(trade: &Trade, exit_price: Price) -> Result<Pnl, MathError> {
    let entry = trade.entry_price.raw();
    let exit = exit_price.raw();

    let (diff, gained) = if exit >= entry {
        (exit - entry, true)
    } else {
        (entry - exit, false)
    };
    let negative = match trade.side {
        Side::Long => !gained,
        Side::Short => gained,
    };

    let relative_return = math::mul_div(diff, SCALE, entry)?;
    let magnitude = math::mul3_div(
        relative_return,
        trade.margin.raw(),
        trade.leverage.value() as u128,
        SCALE,
    )?;

    Ok(Pnl::new(math::signed(magnitude, negative)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Leverage, Quote, Timestamp, TradeId};
    use rust_decimal_macros::dec;

    fn long_trade() -> Trade {
        Trade {
            id: TradeId(1),
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

    fn short_trade() -> Trade {
        Trade {
            side: Side::Short,
            take_profit: Price::from_units(80),
            stop_loss: Price::from_units(110),
            ..long_trade()
        }
    }

    #[test]
    fn long_take_profit_trigger() {
        let trade = long_trade();

        // exactly at and beyond the threshold both exit at the threshold
        for current in [120u64, 121, 500] {
            let (exit, reason) = evaluate_exit(&trade, Price::from_units(current)).unwrap();
            assert_eq!(exit, Price::from_units(120));
            assert_eq!(reason, CloseReason::TakeProfit);
        }
    }

    #[test]
    fn long_stop_loss_trigger() {
        let trade = long_trade();

        for current in [90u64, 89, 1] {
            let (exit, reason) = evaluate_exit(&trade, Price::from_units(current)).unwrap();
            assert_eq!(exit, Price::from_units(90));
            assert_eq!(reason, CloseReason::StopLoss);
        }
    }

    #[test]
    fn short_triggers_mirror_long() {
        let trade = short_trade();

        let (exit, reason) = evaluate_exit(&trade, Price::from_units(80)).unwrap();
        assert_eq!(exit, Price::from_units(80));
        assert_eq!(reason, CloseReason::TakeProfit);

        let (exit, reason) = evaluate_exit(&trade, Price::from_units(110)).unwrap();
        assert_eq!(exit, Price::from_units(110));
        assert_eq!(reason, CloseReason::StopLoss);
    }

    #[test]
    fn no_trigger_inside_the_window() {
        let trade = long_trade();

        for current in [91u64, 100, 119] {
            assert!(evaluate_exit(&trade, Price::from_units(current)).is_none());
        }
    }

    #[test]
    fn manual_close_overrides_stop_loss() {
        let mut trade = long_trade();
        trade.manual_close_requested = true;

        // 85 would hit the stop loss at 90, but the manual request wins and
        // settles at the pushed price itself
        let (exit, reason) = evaluate_exit(&trade, Price::from_units(85)).unwrap();
        assert_eq!(exit, Price::from_units(85));
        assert_eq!(reason, CloseReason::ManualClose);
    }

    #[test]
    fn manual_close_settles_between_thresholds() {
        let mut trade = long_trade();
        trade.manual_close_requested = true;

        let (exit, reason) = evaluate_exit(&trade, Price::from_units(105)).unwrap();
        assert_eq!(exit, Price::from_units(105));
        assert_eq!(reason, CloseReason::ManualClose);
    }

    #[test]
    fn thresholds_on_the_wrong_side_trigger_immediately() {
        // no sanity validation at open time: a long whose take profit is
        // already below the market exits on the first update
        let mut trade = long_trade();
        trade.take_profit = Price::from_units(95);

        let (exit, reason) = evaluate_exit(&trade, Price::from_units(100)).unwrap();
        assert_eq!(exit, Price::from_units(95));
        assert_eq!(reason, CloseReason::TakeProfit);
    }

    #[test]
    fn long_pnl_exact_values() {
        let trade = long_trade();

        // (120 - 100) / 100 * 1000 * 10 = +2000
        let win = compute_pnl(&trade, Price::from_units(120)).unwrap();
        assert_eq!(win.to_decimal().unwrap(), dec!(2000));

        // (90 - 100) / 100 * 1000 * 10 = -1000
        let loss = compute_pnl(&trade, Price::from_units(90)).unwrap();
        assert_eq!(loss.to_decimal().unwrap(), dec!(-1000));
    }

    #[test]
    fn short_pnl_mirrors_long() {
        let trade = short_trade();

        // (100 - 80) / 100 * 1000 * 10 = +2000
        let win = compute_pnl(&trade, Price::from_units(80)).unwrap();
        assert_eq!(win.to_decimal().unwrap(), dec!(2000));

        // (100 - 110) / 100 * 1000 * 10 = -1000
        let loss = compute_pnl(&trade, Price::from_units(110)).unwrap();
        assert_eq!(loss.to_decimal().unwrap(), dec!(-1000));
    }

    #[test]
    fn pnl_zero_when_exit_equals_entry() {
        assert_eq!(compute_pnl(&long_trade(), Price::from_units(100)).unwrap(), Pnl::new(0));
        assert_eq!(compute_pnl(&short_trade(), Price::from_units(100)).unwrap(), Pnl::new(0));
    }

    #[test]
    fn relative_return_truncates_toward_zero() {
        let mut trade = long_trade();
        trade.entry_price = Price::from_units(3);
        trade.margin = Quote::from_units(1);
        trade.leverage = Leverage::new(1).unwrap();

        // (4 - 3) / 3 = 0.333... truncated at 18 decimal places, then
        // carried through margin 1 and leverage 1 unchanged
        let pnl = compute_pnl(&trade, Price::from_units(4)).unwrap();
        assert_eq!(pnl.raw(), 333_333_333_333_333_333);

        // the symmetric loss truncates toward zero as well, not toward
        // negative infinity
        let pnl = compute_pnl(&trade, Price::from_units(2)).unwrap();
        assert_eq!(pnl.raw(), -333_333_333_333_333_333);
    }

    #[test]
    fn pnl_overflow_rejected() {
        let mut trade = long_trade();
        trade.entry_price = Price::new(1).unwrap();
        trade.margin = Quote::new(u128::MAX);
        trade.leverage = Leverage::new(500).unwrap();

        let result = compute_pnl(&trade, Price::new(u128::MAX).unwrap());
        assert_eq!(result, Err(MathError::Overflow));
    }
}
