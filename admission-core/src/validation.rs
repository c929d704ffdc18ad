//! Field-level validation for the admission form.
//!
//! Each field is checked against a fixed list of rules, evaluated in order
//! with the first failing rule reported:
//!
//! 1. Blank input is [`ValidationError::Required`].
//! 2. Input that is not a non-negative decimal is [`ValidationError::InvalidNumber`].
//! 3. An obtained field larger than its paired total is [`ValidationError::ExceedsTotal`].
//! 4. A total field smaller than its paired obtained value is [`ValidationError::ExceedsTotal`].
//! 5. An entry test score above the configured maximum is [`ValidationError::ExceedsMaximum`].
//!
//! Rules 3 and 4 read the partner field's raw text as it currently stands in the
//! [`FormState`]. A partner that is blank or not a valid number skips the check.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::{FieldName, FieldRole, FormState};

/// Reasons a single field can be rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// The field is empty or whitespace-only.
    #[error("This field is required")]
    Required,

    /// The text is not a non-negative decimal number.
    #[error("Enter a valid number")]
    InvalidNumber,

    /// Obtained marks are larger than total marks.
    ///
    /// `role` records which member of the pair was being validated so the
    /// message can address the field the user is looking at.
    #[error("{}", exceeds_total_message(.role))]
    ExceedsTotal { role: FieldRole },

    /// The entry test score is above the allowed maximum.
    #[error("Entry test marks cannot exceed {max}")]
    ExceedsMaximum { max: Decimal },
}

fn exceeds_total_message(role: &FieldRole) -> &'static str {
    match role {
        FieldRole::Obtained => "Obtained marks cannot exceed total marks",
        FieldRole::Total => "Total must be greater than obtained",
    }
}

/// Most significant digits a [`Decimal`] holds without rounding.
pub const MAX_SIGNIFICANT_DIGITS: usize = 28;

/// Checks the shape of trimmed input and returns it with thousands separators removed.
///
/// Accepts ASCII digits with at most one `.`, and commas only between
/// three-digit groups of the integer part. Signs, exponents, `_` and
/// anything else yield `None`.
fn normalize_marks_input(s: &str) -> Option<String> {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let mut groups = int_part.split(',');
    let lead = groups.next().unwrap_or_default();
    let grouped = int_part.contains(',');
    if !all_digits(lead) || (grouped && !(1..=3).contains(&lead.len())) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && all_digits(g)) {
        return None;
    }

    let frac = frac_part.unwrap_or_default();
    if lead.is_empty() || !all_digits(frac) || (frac_part.is_some() && frac.is_empty()) {
        return None;
    }

    let plain = s.replace(',', "");
    let int_digits = plain.split('.').next().unwrap_or_default().trim_start_matches('0');
    if int_digits.len() + frac.len() > MAX_SIGNIFICANT_DIGITS {
        return None;
    }

    Some(plain)
}

/// Parses raw field text into a non-negative [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,100"`). Input with more
/// than [`MAX_SIGNIFICANT_DIGITS`] digits is rejected rather than rounded.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] for empty or whitespace-only input and
/// [`ValidationError::InvalidNumber`] for anything that is not a plain decimal `>= 0`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use admission_core::validation::{ValidationError, parse_marks};
///
/// assert_eq!(parse_marks(" 1,100 "), Ok(dec!(1100)));
/// assert_eq!(parse_marks("   "), Err(ValidationError::Required));
/// assert_eq!(parse_marks("-5"), Err(ValidationError::InvalidNumber));
/// assert_eq!(parse_marks("80abc"), Err(ValidationError::InvalidNumber));
/// assert_eq!(parse_marks("1e3"), Err(ValidationError::InvalidNumber));
/// ```
pub fn parse_marks(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }
    let Some(normalized) = normalize_marks_input(trimmed) else {
        debug!(input = %raw, "rejected marks: not a plain decimal");
        return Err(ValidationError::InvalidNumber);
    };
    normalized.parse().map_err(|e| {
        debug!(input = %raw, "rejected marks: {}", e);
        ValidationError::InvalidNumber
    })
}

/// Applies the field rules using a configurable entry test maximum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidator {
    entry_test_max: Decimal,
}

impl FieldValidator {
    pub fn new(entry_test_max: Decimal) -> Self {
        Self { entry_test_max }
    }

    pub fn entry_test_max(&self) -> Decimal {
        self.entry_test_max
    }

    /// Validates `raw` as the new text of `field`.
    ///
    /// `state` supplies the partner field for the cross-field checks. Only the
    /// partner's raw text is consulted; its own error state is neither read
    /// nor changed.
    pub fn validate(
        &self,
        field: FieldName,
        raw: &str,
        state: &FormState,
    ) -> Result<(), ValidationError> {
        let value = parse_marks(raw)?;

        if let Some(partner) = field.partner() {
            // A blank or malformed partner cannot be compared against.
            if let Ok(partner_value) = parse_marks(&state[partner]) {
                let (obtained, total) = match field.role() {
                    FieldRole::Obtained => (value, partner_value),
                    FieldRole::Total => (partner_value, value),
                };
                if obtained > total {
                    return Err(ValidationError::ExceedsTotal { role: field.role() });
                }
            }
        }

        if field == FieldName::EntryTestObtained && value > self.entry_test_max {
            return Err(ValidationError::ExceedsMaximum {
                max: self.entry_test_max,
            });
        }

        Ok(())
    }
}
