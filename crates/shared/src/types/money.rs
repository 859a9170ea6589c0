//! Decimal amount helpers.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts and quantities are `rust_decimal::Decimal` everywhere.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for derived amounts (subtotals, tax).
pub const AMOUNT_DECIMAL_PLACES: u32 = 4;

/// Rounds a derived amount to [`AMOUNT_DECIMAL_PLACES`].
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
#[must_use]
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
}

/// Returns `rate` percent of `amount`, rounded with [`round_amount`].
///
/// Returns `None` if the product does not fit in a `Decimal`.
#[must_use]
pub fn percent_of(amount: Decimal, rate: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(rate)?
        .checked_div(Decimal::ONE_HUNDRED)
        .map(round_amount)
}

/// Returns true if `value` carries no more than [`AMOUNT_DECIMAL_PLACES`]
/// significant decimal places.
#[must_use]
pub fn fits_amount_scale(value: Decimal) -> bool {
    value.normalize().scale() <= AMOUNT_DECIMAL_PLACES
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;
