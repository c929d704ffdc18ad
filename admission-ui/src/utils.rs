use admission_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats a percentage for display with exactly two decimal places, e.g. `81.00%`.
///
/// Rounds half-up, so `66.665` becomes `66.67%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", round_half_up(value))
}

/// Formats an optional raw field value for display, using "—" when blank.
pub fn raw_value_display(raw: &str) -> &str {
    if raw.trim().is_empty() { "—" } else { raw }
}
