mod error_map;
mod field_name;
mod form_state;

pub use error_map::ErrorMap;
pub use field_name::{FieldName, FieldRole};
pub use form_state::FormState;
