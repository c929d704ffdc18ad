//! Outbound interface from the engine to whatever renders the form.

use crate::calculations::AggregateResult;
use crate::models::FieldName;
use crate::validation::ValidationError;

/// Receives display updates from a [`FormEngine`](crate::engine::FormEngine).
///
/// Implementations only render; they never call back into the engine.
pub trait FormView {
    /// Show `error` next to `field`, or clear it when `None`.
    fn display_field_error(
        &mut self,
        field: FieldName,
        error: Option<&ValidationError>,
    );

    /// Enable or disable the compute action.
    fn set_submit_enabled(
        &mut self,
        enabled: bool,
    );

    /// Show or hide the "calculating" indicator.
    fn set_busy_indicator(
        &mut self,
        busy: bool,
    );

    /// Show a calculated result, or hide the result area when `None`.
    fn display_result(
        &mut self,
        result: Option<&AggregateResult>,
    );

    /// Empty every input on the form.
    fn clear_fields(&mut self);
}
