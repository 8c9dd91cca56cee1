//! Shared numeric helpers.
//!
//! Products of amounts and rates are exact in `Decimal` and are left alone.
//! Only quotients are rounded, to two decimal places, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for currency amounts and percentages.
pub const DECIMAL_PLACES: u32 = 2;

/// Rounds a currency amount to cents.
///
/// # Examples
///
/// ```
/// use parafiscal_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("416666.665").unwrap()), Decimal::from_str("416666.67").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("-0.005").unwrap()), Decimal::from_str("-0.01").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `numerator / denominator`, or zero when the denominator is zero.
pub fn safe_ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Returns `part / whole * 100` rounded to two places, or zero when `whole` is zero.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    round_currency(safe_ratio(part, whole) * Decimal::ONE_HUNDRED)
}
