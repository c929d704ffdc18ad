use super::FieldName;
use crate::validation::ValidationError;

/// Current validation outcome for each form field.
///
/// A field with no entry has either never been validated or passed its last
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    errors: [Option<ValidationError>; 5],
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: FieldName,
    ) -> Option<&ValidationError> {
        self.errors[field.index()].as_ref()
    }

    /// Records the outcome of validating `field`.
    pub fn record(
        &mut self,
        field: FieldName,
        outcome: Result<(), ValidationError>,
    ) {
        self.errors[field.index()] = outcome.err();
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    /// Iterates over `(field, error)` for the fields that currently have one.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &ValidationError)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|error| (field, error)))
    }

    pub fn clear(&mut self) {
        self.errors = Default::default();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_map_has_no_errors() {
        assert!(!ErrorMap::new().has_errors());
    }

    #[test]
    fn record_stores_and_clears_errors() {
        let mut map = ErrorMap::new();

        map.record(FieldName::MatricTotal, Err(ValidationError::Required));
        assert_eq!(map.get(FieldName::MatricTotal), Some(&ValidationError::Required));
        assert!(map.has_errors());

        map.record(FieldName::MatricTotal, Ok(()));
        assert_eq!(map.get(FieldName::MatricTotal), None);
        assert!(!map.has_errors());
    }

    #[test]
    fn iter_lists_only_errored_fields() {
        let mut map = ErrorMap::new();
        map.record(FieldName::InterObtained, Err(ValidationError::InvalidNumber));
        map.record(FieldName::MatricObtained, Err(ValidationError::Required));

        let fields: Vec<FieldName> = map.iter().map(|(f, _)| f).collect();

        assert_eq!(fields, vec![FieldName::MatricObtained, FieldName::InterObtained]);
    }

    #[test]
    fn clear_drops_every_error() {
        let mut map = ErrorMap::new();
        for field in FieldName::ALL {
            map.record(field, Err(ValidationError::Required));
        }
        map.clear();

        assert_eq!(map, ErrorMap::new());
    }
}
