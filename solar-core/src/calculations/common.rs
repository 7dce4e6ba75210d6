//! Common helpers shared by the estimator calculations.

use rust_decimal::Decimal;

/// Rounds a value to exactly two decimal places, midpoints away from zero.
///
/// Used for the estimated production shown to the user; every other value
/// keeps the precision it was entered with.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use solar_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(21927.375)), dec!(21927.38));
/// assert_eq!(round_half_up(dec!(21927.374)), dec!(21927.37));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Scales a per-unit quantity by a whole count (per-panel area, wattage).
///
/// Returns `None` if the product does not fit in a `Decimal`.
pub fn scale_by_count(
    per_unit: Decimal,
    count: u32,
) -> Option<Decimal> {
    per_unit.checked_mul(Decimal::from(count))
}
