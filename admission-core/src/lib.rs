//! Validation and scoring engine for the admission aggregate form.
//!
//! The form collects matric and intermediate marks (obtained and total) plus
//! an entry test score, validates them field by field, and produces a
//! weighted aggregate percentage.

pub mod calculations;
pub mod config;
pub mod engine;
pub mod models;
pub mod validation;
pub mod view;

pub use calculations::{AggregateResult, CalculationError};
pub use config::{ConfigError, EngineConfig};
pub use engine::{FormEngine, SubmitError};
pub use models::*;
pub use validation::ValidationError;
pub use view::FormView;
