//! The form engine: field state, validation and the aggregate calculation.
//!
//! [`FormEngine`] is the single owner and mutator of the form. A UI layer
//! forwards user actions to it as method calls and receives display updates
//! through the [`FormView`] it handed to the engine at construction.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use admission_core::{EngineConfig, FieldName, FormEngine, FormView};
//! use admission_core::calculations::AggregateResult;
//! use admission_core::validation::ValidationError;
//!
//! struct NullView;
//!
//! impl FormView for NullView {
//!     fn display_field_error(&mut self, _: FieldName, _: Option<&ValidationError>) {}
//!     fn set_submit_enabled(&mut self, _: bool) {}
//!     fn set_busy_indicator(&mut self, _: bool) {}
//!     fn display_result(&mut self, _: Option<&AggregateResult>) {}
//!     fn clear_fields(&mut self) {}
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let config = EngineConfig::default().with_delay(Duration::ZERO);
//! let mut engine = FormEngine::new(config, NullView).unwrap();
//!
//! engine.set_field(FieldName::MatricObtained, "80");
//! engine.set_field(FieldName::MatricTotal, "100");
//! engine.set_field(FieldName::InterObtained, "70");
//! engine.set_field(FieldName::InterTotal, "100");
//! engine.set_field(FieldName::EntryTestObtained, "90");
//! assert!(engine.can_submit());
//!
//! let result = engine.submit().await.unwrap();
//! assert_eq!(result.aggregate, rust_decimal_macros::dec!(81));
//! # });
//! ```

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculations::{AggregateCalculator, AggregateInput, AggregateResult, CalculationError};
use crate::config::{ConfigError, EngineConfig};
use crate::models::{ErrorMap, FieldName, FormState};
use crate::validation::{FieldValidator, ValidationError};
use crate::view::FormView;

/// Reasons a submission produced no result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// A calculation is already in progress.
    #[error("a calculation is already in progress")]
    Busy,

    /// At least one field failed validation.
    #[error("the form has invalid or missing fields")]
    InvalidForm,

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// Owns the admission form and drives its view.
#[derive(Debug)]
pub struct FormEngine<V: FormView> {
    state: FormState,
    errors: ErrorMap,
    busy: bool,
    validator: FieldValidator,
    calculator: AggregateCalculator,
    delay: Duration,
    view: V,
}

impl<V: FormView> FormEngine<V> {
    /// Creates an engine with an empty form.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(
        config: EngineConfig,
        view: V,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: FormState::new(),
            errors: ErrorMap::new(),
            busy: false,
            validator: FieldValidator::new(config.entry_test_max),
            calculator: AggregateCalculator::new(config.weights)?,
            delay: config.delay,
            view,
        })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Stores new raw text for `field` and re-validates that field alone.
    ///
    /// The view is told about the field's error, the new submit eligibility,
    /// and that any shown result is now out of date.
    pub fn set_field(
        &mut self,
        field: FieldName,
        raw: impl Into<String>,
    ) {
        let raw = raw.into();
        let outcome = self.validate_field(field, &raw);
        debug!(field = %field, raw = %raw, ?outcome, "field updated");

        self.state.set(field, raw);
        self.errors.record(field, outcome);

        self.view.display_field_error(field, self.errors.get(field));
        self.view.display_result(None);
        self.refresh_submit_enabled();
    }

    /// Checks `raw` as a value for `field` against the current form.
    ///
    /// Does not modify any state.
    pub fn validate_field(
        &self,
        field: FieldName,
        raw: &str,
    ) -> Result<(), ValidationError> {
        self.validator.validate(field, raw, &self.state)
    }

    /// Re-validates every field and returns `true` if none has an error.
    pub fn validate_form(&mut self) -> bool {
        for field in FieldName::ALL {
            let outcome = self.validate_field(field, &self.state[field]);
            self.errors.record(field, outcome);
            self.view.display_field_error(field, self.errors.get(field));
        }
        self.refresh_submit_enabled();

        let valid = !self.errors.has_errors();
        debug!(valid, "form validated");
        valid
    }

    /// Whether the compute action should be offered right now.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.errors.has_errors() && !self.state.has_blank_fields()
    }

    /// Waits out the configured delay, then computes the aggregate.
    ///
    /// Expects the form to have just passed [`validate_form`](Self::validate_form).
    /// The delay is always served in full, even when the calculation then fails.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::ZeroTotal`] when a total is zero,
    /// [`CalculationError::Unparseable`] if a field is not numeric, and
    /// [`CalculationError::Overflow`] on decimal overflow.
    pub async fn compute_aggregate(&self) -> Result<AggregateResult, CalculationError> {
        info!(delay = ?self.delay, "calculating aggregate");
        tokio::time::sleep(self.delay).await;

        let input = AggregateInput::from_form(&self.state, self.validator.entry_test_max())?;
        self.calculator.calculate(&input)
    }

    /// Validates the form and, if it passes, calculates and displays the aggregate.
    ///
    /// The busy flag is held for the duration of the calculation and released
    /// whatever the outcome. If the returned future is dropped before it
    /// completes the engine stays busy until [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Busy`] while another calculation holds the busy
    /// flag, [`SubmitError::InvalidForm`] when validation fails, and
    /// [`SubmitError::Calculation`] when the calculation itself fails.
    pub async fn submit(&mut self) -> Result<AggregateResult, SubmitError> {
        if self.busy {
            warn!("submit ignored: calculation already in progress");
            return Err(SubmitError::Busy);
        }
        if !self.validate_form() {
            warn!(
                invalid_fields = self.errors.iter().count(),
                "submit refused: form has errors"
            );
            return Err(SubmitError::InvalidForm);
        }

        self.busy = true;
        self.view.set_busy_indicator(true);
        self.view.set_submit_enabled(false);

        let outcome = self.compute_aggregate().await;

        self.busy = false;
        self.view.set_busy_indicator(false);
        self.refresh_submit_enabled();

        match &outcome {
            Ok(result) => {
                info!(aggregate = %result.aggregate, "aggregate calculated");
                self.view.display_result(Some(result));
            }
            Err(error) => {
                warn!(%error, "aggregate could not be calculated");
                self.view.display_result(None);
            }
        }

        outcome.map_err(SubmitError::from)
    }

    /// Returns the form to its initial empty state.
    pub fn reset(&mut self) {
        self.state.clear();
        self.errors.clear();
        self.busy = false;

        self.view.clear_fields();
        for field in FieldName::ALL {
            self.view.display_field_error(field, None);
        }
        self.view.display_result(None);
        self.view.set_busy_indicator(false);
        self.refresh_submit_enabled();
        debug!("form reset");
    }

    fn refresh_submit_enabled(&mut self) {
        let enabled = self.can_submit();
        self.view.set_submit_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::models::FieldRole;

    /// Remembers the last state pushed for each display element.
    #[derive(Debug, Default)]
    struct LastStateView {
        field_errors: Vec<(FieldName, Option<ValidationError>)>,
        submit_enabled: Option<bool>,
        busy: Option<bool>,
        result_shown: Option<bool>,
        clears: usize,
    }

    impl LastStateView {
        fn error_for(
            &self,
            field: FieldName,
        ) -> Option<&ValidationError> {
            self.field_errors
                .iter()
                .rev()
                .find(|(f, _)| *f == field)
                .and_then(|(_, e)| e.as_ref())
        }
    }

    impl FormView for LastStateView {
        fn display_field_error(
            &mut self,
            field: FieldName,
            error: Option<&ValidationError>,
        ) {
            self.field_errors.push((field, error.cloned()));
        }

        fn set_submit_enabled(
            &mut self,
            enabled: bool,
        ) {
            self.submit_enabled = Some(enabled);
        }

        fn set_busy_indicator(
            &mut self,
            busy: bool,
        ) {
            self.busy = Some(busy);
        }

        fn display_result(
            &mut self,
            result: Option<&AggregateResult>,
        ) {
            self.result_shown = Some(result.is_some());
        }

        fn clear_fields(&mut self) {
            self.clears += 1;
        }
    }

    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn engine() -> FormEngine<LastStateView> {
        let config = EngineConfig::default().with_delay(Duration::ZERO);
        FormEngine::new(config, LastStateView::default()).unwrap()
    }

    fn fill(
        engine: &mut FormEngine<LastStateView>,
        values: [&str; 5],
    ) {
        for (field, raw) in FieldName::ALL.into_iter().zip(values) {
            engine.set_field(field, raw);
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn new_engine_starts_empty_and_idle() {
        let engine = engine();

        assert_eq!(engine.state(), &FormState::new());
        assert!(!engine.errors().has_errors());
        assert!(!engine.is_busy());
        assert!(!engine.can_submit());
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = EngineConfig::default().with_entry_test_max(dec!(-1));

        assert_eq!(
            FormEngine::new(config, LastStateView::default()).err(),
            Some(ConfigError::InvalidEntryTestMax(dec!(-1)))
        );
    }

    // =========================================================================
    // set_field
    // =========================================================================

    #[test]
    fn set_field_records_value_and_error() {
        let _guard = init_test_tracing();
        let mut engine = engine();

        engine.set_field(FieldName::InterTotal, "abc");

        assert_eq!(&engine.state()[FieldName::InterTotal], "abc");
        assert_eq!(
            engine.errors().get(FieldName::InterTotal),
            Some(&ValidationError::InvalidNumber)
        );
        assert_eq!(
            engine.view().error_for(FieldName::InterTotal),
            Some(&ValidationError::InvalidNumber)
        );
    }

    #[test]
    fn set_field_hides_previous_result() {
        let mut engine = engine();

        engine.set_field(FieldName::MatricObtained, "80");

        assert_eq!(engine.view().result_shown, Some(false));
    }

    #[test]
    fn valid_pair_has_no_errors() {
        let mut engine = engine();

        engine.set_field(FieldName::MatricObtained, "80");
        engine.set_field(FieldName::MatricTotal, "100");

        assert_eq!(engine.errors().get(FieldName::MatricObtained), None);
        assert_eq!(engine.errors().get(FieldName::MatricTotal), None);
    }

    #[test]
    fn obtained_above_total_is_flagged_on_obtained() {
        let mut engine = engine();

        engine.set_field(FieldName::MatricTotal, "80");
        engine.set_field(FieldName::MatricObtained, "90");

        assert_eq!(
            engine.errors().get(FieldName::MatricObtained),
            Some(&ValidationError::ExceedsTotal {
                role: FieldRole::Obtained
            })
        );
        assert_eq!(engine.errors().get(FieldName::MatricTotal), None);
    }

    #[test]
    fn lowering_total_does_not_touch_obtained_error() {
        let mut engine = engine();

        engine.set_field(FieldName::MatricObtained, "90");
        engine.set_field(FieldName::MatricTotal, "100");
        engine.set_field(FieldName::MatricTotal, "80");

        // Only the edited field is re-validated.
        assert_eq!(engine.errors().get(FieldName::MatricObtained), None);
        assert_eq!(
            engine.errors().get(FieldName::MatricTotal),
            Some(&ValidationError::ExceedsTotal {
                role: FieldRole::Total
            })
        );
    }

    #[test]
    fn fixing_total_leaves_stale_error_on_obtained() {
        let mut engine = engine();

        engine.set_field(FieldName::InterTotal, "50");
        engine.set_field(FieldName::InterObtained, "60");
        engine.set_field(FieldName::InterTotal, "100");

        assert!(engine.errors().get(FieldName::InterObtained).is_some());
        assert!(!engine.can_submit());

        engine.validate_form();
        assert_eq!(engine.errors().get(FieldName::InterObtained), None);
    }

    // =========================================================================
    // validate_field
    // =========================================================================

    #[test]
    fn validate_field_does_not_mutate() {
        let engine = engine();

        assert_eq!(
            engine.validate_field(FieldName::EntryTestObtained, "101"),
            Err(ValidationError::ExceedsMaximum { max: dec!(100) })
        );
        assert_eq!(engine.validate_field(FieldName::EntryTestObtained, "100"), Ok(()));
        assert!(!engine.errors().has_errors());
        assert_eq!(engine.state(), &FormState::new());
    }

    // =========================================================================
    // validate_form / can_submit
    // =========================================================================

    #[test]
    fn validate_form_on_empty_form_requires_every_field() {
        let mut engine = engine();

        assert!(!engine.validate_form());
        for field in FieldName::ALL {
            assert_eq!(engine.errors().get(field), Some(&ValidationError::Required));
        }
    }

    #[test]
    fn validate_form_is_idempotent() {
        let mut engine = engine();
        fill(&mut engine, ["90", "80", "", "x", "101"]);

        let first = engine.validate_form();
        let errors_after_first = engine.errors().clone();
        let second = engine.validate_form();

        assert_eq!(first, second);
        assert_eq!(engine.errors(), &errors_after_first);
    }

    #[test]
    fn can_submit_requires_all_fields_filled() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", ""]);

        engine.set_field(FieldName::EntryTestObtained, "90");
        assert!(engine.can_submit());
        assert_eq!(engine.view().submit_enabled, Some(true));

        engine.set_field(FieldName::EntryTestObtained, " ");
        assert!(!engine.can_submit());
        assert_eq!(engine.view().submit_enabled, Some(false));
    }

    #[test]
    fn can_submit_false_while_any_error_is_active() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", "101"]);

        assert!(!engine.can_submit());
    }

    // =========================================================================
    // reset
    // =========================================================================

    #[test]
    fn reset_clears_form_and_view() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", "101"]);

        engine.reset();

        assert_eq!(engine.state(), &FormState::new());
        assert!(!engine.errors().has_errors());
        assert!(!engine.is_busy());
        assert_eq!(engine.view().clears, 1);
        assert_eq!(engine.view().error_for(FieldName::EntryTestObtained), None);
        assert_eq!(engine.view().busy, Some(false));
        assert_eq!(engine.view().result_shown, Some(false));
        assert_eq!(engine.view().submit_enabled, Some(false));
    }

    #[test]
    fn reset_then_validate_requires_every_field() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", "90"]);

        engine.reset();
        engine.reset();

        assert!(!engine.validate_form());
        for field in FieldName::ALL {
            assert_eq!(engine.errors().get(field), Some(&ValidationError::Required));
        }
    }

    // =========================================================================
    // submit
    // =========================================================================

    #[tokio::test]
    async fn submit_computes_expected_aggregate() {
        let _guard = init_test_tracing();
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", "90"]);

        let result = engine.submit().await.unwrap();

        assert_eq!(result.aggregate, dec!(81));
        assert_eq!(result.matric_percentage, dec!(80));
        assert!(!engine.is_busy());
        assert_eq!(engine.view().busy, Some(false));
        assert_eq!(engine.view().result_shown, Some(true));
        assert_eq!(engine.view().submit_enabled, Some(true));
    }

    #[tokio::test]
    async fn submit_refuses_invalid_form() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "", "90"]);

        assert_eq!(engine.submit().await, Err(SubmitError::InvalidForm));
        assert_eq!(
            engine.errors().get(FieldName::InterTotal),
            Some(&ValidationError::Required)
        );
        assert_eq!(engine.view().busy, None);
    }

    #[tokio::test]
    async fn submit_refuses_while_busy() {
        let mut engine = engine();
        fill(&mut engine, ["80", "100", "70", "100", "90"]);
        engine.busy = true;

        assert_eq!(engine.submit().await, Err(SubmitError::Busy));
        assert!(!engine.can_submit());
    }

    #[tokio::test]
    async fn submit_with_zero_total_reports_calculation_error() {
        let mut engine = engine();
        fill(&mut engine, ["0", "0", "70", "100", "90"]);

        assert_eq!(
            engine.submit().await,
            Err(SubmitError::Calculation(CalculationError::ZeroTotal(
                FieldName::MatricTotal
            )))
        );
        assert!(!engine.is_busy());
        assert_eq!(engine.view().result_shown, Some(false));
    }
}
