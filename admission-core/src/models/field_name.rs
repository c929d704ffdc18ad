use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a field holds marks obtained or the total marks available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRole {
    Obtained,
    Total,
}

/// One of the five inputs on the admission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    MatricObtained,
    MatricTotal,
    InterObtained,
    InterTotal,
    EntryTestObtained,
}

impl FieldName {
    /// Every field, in form order.
    pub const ALL: [FieldName; 5] = [
        Self::MatricObtained,
        Self::MatricTotal,
        Self::InterObtained,
        Self::InterTotal,
        Self::EntryTestObtained,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatricObtained => "matricObtained",
            Self::MatricTotal => "matricTotal",
            Self::InterObtained => "interObtained",
            Self::InterTotal => "interTotal",
            Self::EntryTestObtained => "entryTestObtained",
        }
    }

    /// Parses a wire name. The snake_case spelling is accepted as an alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "matricObtained" | "matric_obtained" => Some(Self::MatricObtained),
            "matricTotal" | "matric_total" => Some(Self::MatricTotal),
            "interObtained" | "inter_obtained" => Some(Self::InterObtained),
            "interTotal" | "inter_total" => Some(Self::InterTotal),
            "entryTestObtained" | "entry_test_obtained" => Some(Self::EntryTestObtained),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MatricObtained => "Matric marks obtained",
            Self::MatricTotal => "Matric total marks",
            Self::InterObtained => "Intermediate marks obtained",
            Self::InterTotal => "Intermediate total marks",
            Self::EntryTestObtained => "Entry test marks obtained",
        }
    }

    pub fn role(&self) -> FieldRole {
        match self {
            Self::MatricTotal | Self::InterTotal => FieldRole::Total,
            Self::MatricObtained | Self::InterObtained | Self::EntryTestObtained => {
                FieldRole::Obtained
            }
        }
    }

    /// The other member of this field's (obtained, total) pair.
    ///
    /// The entry test has no total field and therefore no partner.
    pub fn partner(&self) -> Option<Self> {
        match self {
            Self::MatricObtained => Some(Self::MatricTotal),
            Self::MatricTotal => Some(Self::MatricObtained),
            Self::InterObtained => Some(Self::InterTotal),
            Self::InterTotal => Some(Self::InterObtained),
            Self::EntryTestObtained => None,
        }
    }

    /// Position of the field in [`FieldName::ALL`].
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::MatricObtained => 0,
            Self::MatricTotal => 1,
            Self::InterObtained => 2,
            Self::InterTotal => 3,
            Self::EntryTestObtained => 4,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_wire_name() {
        for field in FieldName::ALL {
            assert_eq!(FieldName::parse(field.as_str()), Some(field));
        }
    }

    #[test]
    fn parse_accepts_snake_case_alias() {
        assert_eq!(
            FieldName::parse("entry_test_obtained"),
            Some(FieldName::EntryTestObtained)
        );
    }

    #[test]
    fn parse_rejects_unknown_name() {
        assert_eq!(FieldName::parse("fscObtained"), None);
        assert_eq!(FieldName::parse(""), None);
    }

    #[test]
    fn pairs_are_symmetric() {
        for field in FieldName::ALL {
            if let Some(partner) = field.partner() {
                assert_eq!(partner.partner(), Some(field));
                assert_ne!(partner.role(), field.role());
            }
        }
    }

    #[test]
    fn entry_test_has_no_partner() {
        assert_eq!(FieldName::EntryTestObtained.partner(), None);
        assert_eq!(FieldName::EntryTestObtained.role(), FieldRole::Obtained);
    }

    #[test]
    fn index_matches_position_in_all() {
        for (position, field) in FieldName::ALL.iter().enumerate() {
            assert_eq!(field.index(), position);
        }
    }
}
