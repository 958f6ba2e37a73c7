//! Search schema definitions
//!
//! Admin-authored metadata describing what a search panel looks like and
//! which entity attributes it filters on.

pub mod descriptor;
pub mod field_kind;

pub use descriptor::{Choice, FieldDescriptor, PanelPosition, SearchConfig};
pub use field_kind::FieldKind;
