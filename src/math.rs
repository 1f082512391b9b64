// 2.0: fixed-point arithmetic. every amount in the engine is an integer scaled
// by 10^18, and every division truncates toward zero. products are taken at
// full width (U256) before dividing, so the only way a computation can fail is
// if the final result does not fit back into 128 bits.

use primitive_types::U256;

/// Scale factor shared by all fixed-point values: 18 decimal places.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,
}

/// `a * b / divisor` with a 256-bit intermediate, truncating.
pub fn mul_div(a: u128, b: u128, divisor: u128) -> Result<u128, MathError> {
    if divisor == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = U256::from(a) * U256::from(b);
    narrow(product / U256::from(divisor))
}

/// `a * b * c / divisor` with a 256-bit intermediate, truncating.
/// The three-factor product can exceed 256 bits, so the second multiply is checked.
pub fn mul3_div(a: u128, b: u128, c: u128, divisor: u128) -> Result<u128, MathError> {
    if divisor == 0 {
        return Err(MathError::DivisionByZero);
    }
    let product = (U256::from(a) * U256::from(b))
        .checked_mul(U256::from(c))
        .ok_or(MathError::Overflow)?;
    narrow(product / U256::from(divisor))
}

/// Reattach a sign to an unsigned magnitude, checking the i128 range.
pub fn signed(magnitude: u128, negative: bool) -> Result<i128, MathError> {
    let v = i128::try_from(magnitude).map_err(|_| MathError::Overflow)?;
    Ok(if negative { -v } else { v })
}

fn narrow(value: U256) -> Result<u128, MathError> {
    if value > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(value.as_u128())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_truncates_toward_zero() {
        // 1 * 10^18 / 3 = 0.333... truncated at 18 places
        assert_eq!(mul_div(SCALE, SCALE, 3 * SCALE).unwrap(), 333_333_333_333_333_333);
        assert_eq!(mul_div(2, 3, 4).unwrap(), 1);
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // both factors near u128::MAX: the product only fits in 256 bits
        let a = u128::MAX / 2;
        assert_eq!(mul_div(a, 4, 4).unwrap(), a);
        assert_eq!(mul_div(a, 6, 3).unwrap(), a * 2);
    }

    #[test]
    fn mul_div_overflow_detected() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(MathError::Overflow));
        assert_eq!(mul_div(u128::MAX, u128::MAX, 1), Err(MathError::Overflow));
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert_eq!(mul_div(1, 1, 0), Err(MathError::DivisionByZero));
        assert_eq!(mul3_div(1, 1, 1, 0), Err(MathError::DivisionByZero));
    }

    #[test]
    fn mul3_div_pnl_shape() {
        // 20% relative return on 1000 units of margin at 10x: 0.2 * 1000 * 10 = 2000
        let relative = SCALE / 5;
        let margin = 1000 * SCALE;
        assert_eq!(mul3_div(relative, margin, 10, SCALE).unwrap(), 2000 * SCALE);
    }

    #[test]
    fn mul3_div_overflow_detected() {
        assert_eq!(mul3_div(u128::MAX, u128::MAX, 2, 1), Err(MathError::Overflow));
    }

    #[test]
    fn signed_narrowing() {
        assert_eq!(signed(5, false).unwrap(), 5);
        assert_eq!(signed(5, true).unwrap(), -5);
        assert_eq!(signed(i128::MAX as u128, false).unwrap(), i128::MAX);
        assert_eq!(signed(i128::MAX as u128 + 1, false), Err(MathError::Overflow));
        assert_eq!(signed(u128::MAX, true), Err(MathError::Overflow));
    }
}
