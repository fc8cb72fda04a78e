//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for displayed prices:
//! - Always round to two decimal places, for every currency
//! - Use round half away from zero (0.625 -> 0.63)
//! - Round the unit price before multiplying by quantity, then round again

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Decimal places used for every displayed amount.
pub const PRICE_DECIMALS: u32 = 2;

/// Rounds a value to two decimal places, half away from zero.
#[must_use]
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an amount using the given rate and rounds it for display.
///
/// A product that does not fit in a `Decimal` yields the unconverted amount.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    round_price(amount.checked_mul(rate).unwrap_or(amount))
}
