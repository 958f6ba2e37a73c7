//! Field kind definitions
//!
//! Determines how a search field's raw input is interpreted into a filter
//! predicate. A closed sum type: every consumer matches exhaustively, so an
//! unhandled kind is a compile error rather than a silent no-op.

use serde::{Deserialize, Serialize};

/// Search field kind
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Case-insensitive substring match over a text attribute
    Text,

    /// Independent `{field}_min` / `{field}_max` date bounds (DD.MM.YYYY)
    DateRange,

    /// Independent `{field}_min` / `{field}_max` numeric bounds
    NumericRange {
        /// Lower bound offered by the widget
        #[serde(default)]
        min_value: Option<f64>,
        /// Upper bound offered by the widget
        #[serde(default)]
        max_value: Option<f64>,
        /// Slider step
        #[serde(default)]
        step: Option<f64>,
    },

    /// Equality against exactly one selected value
    SingleChoice,

    /// Disjunction of equality clauses over the selected values
    MultiChoice,
}

impl Default for FieldKind {
    fn default() -> Self {
        FieldKind::Text
    }
}

impl FieldKind {
    /// Create a numeric range kind without widget bounds
    pub fn numeric_range() -> Self {
        FieldKind::NumericRange {
            min_value: None,
            max_value: None,
            step: None,
        }
    }

    /// Create a numeric range kind with widget bounds
    pub fn numeric_range_bounded(min_value: f64, max_value: f64, step: f64) -> Self {
        FieldKind::NumericRange {
            min_value: Some(min_value),
            max_value: Some(max_value),
            step: Some(step),
        }
    }

    /// Check if this kind reads per-bound `_min`/`_max` keys
    pub fn is_range(&self) -> bool {
        matches!(self, FieldKind::DateRange | FieldKind::NumericRange { .. })
    }

    /// Check if this kind draws values from a choice set
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::SingleChoice | FieldKind::MultiChoice)
    }

    /// Get the wire name of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::DateRange => "date_range",
            FieldKind::NumericRange { .. } => "numeric_range",
            FieldKind::SingleChoice => "single_choice",
            FieldKind::MultiChoice => "multi_choice",
        }
    }
}
