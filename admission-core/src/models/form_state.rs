use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::FieldName;

/// Raw text currently entered for each form field.
///
/// Every field always has an entry; an untouched field holds the empty string.
/// Values are kept exactly as typed and are only interpreted during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: [String; 5],
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &self,
        field: FieldName,
    ) -> &str {
        &self.values[field.index()]
    }

    pub fn set(
        &mut self,
        field: FieldName,
        raw: impl Into<String>,
    ) {
        self.values[field.index()] = raw.into();
    }

    /// Returns `true` if `field` is empty or whitespace-only.
    pub fn is_blank(
        &self,
        field: FieldName,
    ) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Returns `true` if any field is empty or whitespace-only.
    pub fn has_blank_fields(&self) -> bool {
        FieldName::ALL.iter().any(|field| self.is_blank(*field))
    }

    /// Iterates over `(field, raw value)` in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL.into_iter().map(|field| (field, self.get(field)))
    }

    /// Clear all values back to the empty string.
    pub fn clear(&mut self) {
        self.values = Default::default();
    }
}

impl Index<FieldName> for FormState {
    type Output = str;

    fn index(
        &self,
        field: FieldName,
    ) -> &str {
        self.get(field)
    }
}
