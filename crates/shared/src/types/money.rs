//! Money rules for the single implicit currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are plain `rust_decimal::Decimal` values with two fractional digits
//! of meaning; everything below one cent is treated as noise.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits of the currency.
pub const CENT_DECIMALS: u32 = 2;

/// Smallest balance magnitude treated as nonzero (one cent).
pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, CENT_DECIMALS);

/// Rounding rule for settlement amounts: half away from zero, so 0.005 becomes 0.01.
pub const ROUNDING_STRATEGY: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Rounds an amount to whole cents using [`ROUNDING_STRATEGY`].
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_DECIMALS, ROUNDING_STRATEGY)
}

/// Returns true if the amount is within [`TOLERANCE`] of zero (exclusive).
#[must_use]
pub fn is_negligible(amount: Decimal) -> bool {
    amount.abs() < TOLERANCE
}

/// Formats an amount with exactly two fractional digits, e.g. `15.00`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_cents(amount);
    rounded.rescale(CENT_DECIMALS);
    rounded.to_string()
}
