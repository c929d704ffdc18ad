//! Weighted admission aggregate.
//!
//! The aggregate combines three component percentages:
//!
//! | Component    | Percentage                                  | Default weight |
//! |--------------|---------------------------------------------|----------------|
//! | Matric       | matric obtained / matric total × 100        | 30%            |
//! | Intermediate | inter obtained / inter total × 100          | 30%            |
//! | Entry test   | entry test obtained / entry test max × 100  | 40%            |
//!
//! All arithmetic is exact decimal arithmetic. Nothing is rounded here;
//! presentation code rounds the final figure to two places.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use admission_core::calculations::{AggregateCalculator, AggregateInput, AggregateWeights};
//!
//! let calculator = AggregateCalculator::new(AggregateWeights::default()).unwrap();
//! let input = AggregateInput {
//!     matric_obtained: dec!(80),
//!     matric_total: dec!(100),
//!     inter_obtained: dec!(70),
//!     inter_total: dec!(100),
//!     entry_test_obtained: dec!(90),
//!     entry_test_total: dec!(100),
//! };
//!
//! let result = calculator.calculate(&input).unwrap();
//! assert_eq!(result.aggregate, dec!(81));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::common::percentage;
use crate::models::{FieldName, FormState};
use crate::validation::parse_marks;

/// Errors that can occur while computing the aggregate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// A total field is zero, so its percentage is undefined.
    #[error("{0} is zero; the percentage is undefined")]
    ZeroTotal(FieldName),

    /// A field did not hold a valid number when the calculation ran.
    #[error("{0} does not hold a valid number")]
    Unparseable(FieldName),

    /// Decimal arithmetic overflowed.
    #[error("aggregate calculation overflowed")]
    Overflow,
}

/// Errors describing an unusable set of weights.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WeightsError {
    /// A single weight lies outside [0, 1].
    #[error("{component} weight must be between 0 and 1, got {value}")]
    OutOfRange {
        component: &'static str,
        value: Decimal,
    },

    /// The weights do not add up to exactly 1.
    #[error("weights must sum to 1, got {0}")]
    SumNotOne(Decimal),
}

/// Share of the aggregate contributed by each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregateWeights {
    pub matric: Decimal,
    pub inter: Decimal,
    pub entry_test: Decimal,
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            matric: dec!(0.30),
            inter: dec!(0.30),
            entry_test: dec!(0.40),
        }
    }
}

impl AggregateWeights {
    /// Validates the weights.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] if any weight is outside [0, 1] or the three
    /// weights do not sum to 1.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use admission_core::calculations::{AggregateWeights, WeightsError};
    ///
    /// let weights = AggregateWeights {
    ///     matric: dec!(0.50),
    ///     inter: dec!(0.50),
    ///     entry_test: dec!(0.40),
    /// };
    ///
    /// assert_eq!(weights.validate(), Err(WeightsError::SumNotOne(dec!(1.40))));
    /// ```
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (component, value) in [
            ("matric", self.matric),
            ("inter", self.inter),
            ("entry test", self.entry_test),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(WeightsError::OutOfRange { component, value });
            }
        }
        let sum = self.matric + self.inter + self.entry_test;
        if sum != Decimal::ONE {
            return Err(WeightsError::SumNotOne(sum));
        }
        Ok(())
    }
}

/// Numeric inputs to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateInput {
    pub matric_obtained: Decimal,
    pub matric_total: Decimal,
    pub inter_obtained: Decimal,
    pub inter_total: Decimal,
    pub entry_test_obtained: Decimal,
    /// Maximum possible entry test score.
    pub entry_test_total: Decimal,
}

impl AggregateInput {
    /// Reads the five form fields as numbers.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Unparseable`] naming the first field that is
    /// blank or not a valid number.
    pub fn from_form(
        state: &FormState,
        entry_test_total: Decimal,
    ) -> Result<Self, CalculationError> {
        let read = |field: FieldName| {
            parse_marks(&state[field]).map_err(|_| CalculationError::Unparseable(field))
        };
        Ok(Self {
            matric_obtained: read(FieldName::MatricObtained)?,
            matric_total: read(FieldName::MatricTotal)?,
            inter_obtained: read(FieldName::InterObtained)?,
            inter_total: read(FieldName::InterTotal)?,
            entry_test_obtained: read(FieldName::EntryTestObtained)?,
            entry_test_total,
        })
    }
}

/// Result of the aggregate calculation.
///
/// Component percentages are kept alongside the aggregate for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub matric_percentage: Decimal,
    pub inter_percentage: Decimal,
    pub entry_test_percentage: Decimal,
    /// Weighted sum of the three percentages. Not clamped.
    pub aggregate: Decimal,
}

/// Calculator for the weighted admission aggregate.
#[derive(Debug, Clone)]
pub struct AggregateCalculator {
    weights: AggregateWeights,
}

impl AggregateCalculator {
    /// Creates a calculator after validating `weights`.
    ///
    /// # Errors
    ///
    /// Returns [`WeightsError`] if the weights are invalid.
    pub fn new(weights: AggregateWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &AggregateWeights {
        &self.weights
    }

    /// Computes the component percentages and their weighted sum.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::ZeroTotal`] if any total is zero and
    /// [`CalculationError::Overflow`] if decimal arithmetic overflows.
    pub fn calculate(
        &self,
        input: &AggregateInput,
    ) -> Result<AggregateResult, CalculationError> {
        let matric_percentage = percentage(
            input.matric_obtained,
            input.matric_total,
            FieldName::MatricTotal,
        )
        .inspect_err(|e| warn!(error = %e, "matric percentage unavailable"))?;

        let inter_percentage = percentage(
            input.inter_obtained,
            input.inter_total,
            FieldName::InterTotal,
        )
        .inspect_err(|e| warn!(error = %e, "intermediate percentage unavailable"))?;

        // The entry test has no total field; its maximum stands in for one.
        let entry_test_percentage = percentage(
            input.entry_test_obtained,
            input.entry_test_total,
            FieldName::EntryTestObtained,
        )?;

        let aggregate = [
            (matric_percentage, self.weights.matric),
            (inter_percentage, self.weights.inter),
            (entry_test_percentage, self.weights.entry_test),
        ]
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, (pct, weight)| {
            pct.checked_mul(weight).and_then(|part| acc.checked_add(part))
        })
        .ok_or(CalculationError::Overflow)?;

        Ok(AggregateResult {
            matric_percentage,
            inter_percentage,
            entry_test_percentage,
            aggregate,
        })
    }
}
