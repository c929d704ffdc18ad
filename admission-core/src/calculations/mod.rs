//! Score calculation modules.
//!
//! This module provides the arithmetic behind the admission aggregate,
//! kept separate from form handling so it can be used on plain numbers.

pub mod aggregate;
pub mod common;

pub use aggregate::{
    AggregateCalculator, AggregateInput, AggregateResult, AggregateWeights, CalculationError,
    WeightsError,
};
