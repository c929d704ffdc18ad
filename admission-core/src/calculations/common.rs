//! Common utility functions for score calculations.
//!
//! This module provides shared functionality used by the aggregate
//! calculation and by presentation code, including rounding and
//! percentage conversion.

use rust_decimal::Decimal;

use super::CalculationError;
use crate::models::FieldName;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use admission_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(81.454)), dec!(81.45));
/// assert_eq!(round_half_up(dec!(81.455)), dec!(81.46));
/// assert_eq!(round_half_up(dec!(66.666666)), dec!(66.67));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Expresses `obtained` as a percentage of `total`, without rounding.
///
/// `total_field` names the field the total came from so a zero total can be
/// reported against it.
///
/// # Errors
///
/// Returns [`CalculationError::ZeroTotal`] if `total` is zero and
/// [`CalculationError::Overflow`] if the result does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use admission_core::calculations::common::percentage;
/// use admission_core::models::FieldName;
///
/// let pct = percentage(dec!(850), dec!(1100), FieldName::MatricTotal).unwrap();
/// assert_eq!(pct.round_dp(4), dec!(77.2727));
/// ```
pub fn percentage(
    obtained: Decimal,
    total: Decimal,
    total_field: FieldName,
) -> Result<Decimal, CalculationError> {
    if total.is_zero() {
        return Err(CalculationError::ZeroTotal(total_field));
    }
    obtained
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(CalculationError::Overflow)
}
