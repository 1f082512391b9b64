// 1.0: all the primitives live here. nothing in the engine works without these types.
// IDs, sides, prices, quote amounts, leverage, timestamps. each is a newtype so the
// compiler catches type mixups. prices and quote amounts are raw integers scaled by
// 10^18 (see math.rs); Display renders them back to decimals for humans.

use crate::math::SCALE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TradeId(pub u64);

// Long = profit when price goes up. Short = profit when price goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Long,
    Short,
}

// number of fractional decimal digits carried by a scaled value
const FP_DECIMALS: u32 = 18;

fn fmt_scaled(raw: i128, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match Decimal::try_from_i128_with_scale(raw, FP_DECIMALS) {
        Ok(d) => write!(f, "{}", d.normalize()),
        Err(_) => write!(f, "{}e-18", raw),
    }
}

// 1.1: reference price, scaled by 10^18. must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(u128);

impl Price {
    #[must_use]
    pub fn new(raw: u128) -> Option<Self> {
        if raw > 0 {
            Some(Self(raw))
        } else {
            None
        }
    }

    pub fn new_unchecked(raw: u128) -> Self {
        debug_assert!(raw > 0);
        Self(raw)
    }

    // whole units, e.g. from_units(100) is a price of 100.0
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * SCALE)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        i128::try_from(self.0)
            .ok()
            .and_then(|v| Decimal::try_from_i128_with_scale(v, FP_DECIMALS).ok())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match i128::try_from(self.0) {
            Ok(v) => fmt_scaled(v, f),
            Err(_) => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.2: unsigned quote-currency amount, scaled by 10^18. balances and margins use this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Quote(u128);

impl Quote {
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * SCALE)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: Quote) -> Option<Quote> {
        self.0.checked_add(other.0).map(Quote)
    }

    // floor at zero. balance clamping relies on this never underflowing.
    pub fn saturating_sub(&self, other: Quote) -> Quote {
        Quote(self.0.saturating_sub(other.0))
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        i128::try_from(self.0)
            .ok()
            .and_then(|v| Decimal::try_from_i128_with_scale(v, FP_DECIMALS).ok())
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match i128::try_from(self.0) {
            Ok(v) => fmt_scaled(v, f),
            Err(_) => write!(f, "{}e-18", self.0),
        }
    }
}

// 1.3: signed realized profit or loss, scaled by 10^18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pnl(i128);

impl Pnl {
    pub fn new(raw: i128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> i128 {
        self.0
    }

    pub fn is_profit(&self) -> bool {
        self.0 > 0
    }

    pub fn magnitude(&self) -> Quote {
        Quote(self.0.unsigned_abs())
    }

    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::try_from_i128_with_scale(self.0, FP_DECIMALS).ok()
    }
}

impl fmt::Display for Pnl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_scaled(self.0, f)
    }
}

// 1.4: leverage multiplier, whole number between 1x and 500x inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Leverage(u32);

impl Leverage {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 500;

    #[must_use]
    pub fn new(value: u32) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.0)
    }
}

// 1.5: millisecond timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> i64 {
        self.0
    }
}
