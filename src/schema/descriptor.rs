//! Field descriptors and search panel configurations
//!
//! These are the two persisted shapes of the engine: a `SearchConfig` owns an
//! ordered set of `FieldDescriptor`s and binds them to one entity type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field_kind::FieldKind;

/// A single (value, label) pair offered by a selection-style field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Where a search panel is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    #[default]
    Top,
    Left,
    Right,
    Bottom,
    Modal,
}

/// Metadata describing one searchable/filterable attribute of an entity type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: u64,
    /// Owning configuration, assigned by the store on insert
    #[serde(default)]
    pub config_id: u64,

    /// Attribute name on the target entity type
    pub field_name: String,
    /// Human-readable name, presentation only
    pub label: String,
    /// How raw input for this field is interpreted
    #[serde(default)]
    pub kind: FieldKind,

    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default = "default_true")]
    pub is_searchable: bool,
    #[serde(default)]
    pub is_required: bool,

    #[serde(default)]
    pub placeholder: String,
    /// Presentation order; ties break by ascending `field_name`
    #[serde(default)]
    pub order: u32,

    /// Stored choices; empty means introspect from entity metadata
    #[serde(default)]
    pub choice_set: Vec<Choice>,
}

fn default_true() -> bool {
    true
}

impl FieldDescriptor {
    /// Create a descriptor with the given attribute name, label and kind
    pub fn new(field_name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: 0,
            config_id: 0,
            field_name: field_name.into(),
            label: label.into(),
            kind,
            is_visible: true,
            is_searchable: true,
            is_required: false,
            placeholder: String::new(),
            order: 0,
            choice_set: Vec::new(),
        }
    }

    /// Set the presentation order
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Set whether this field contributes to predicates
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.is_searchable = searchable;
        self
    }

    /// Set whether this field is rendered in the panel
    pub fn visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Mark this field as required in the form (presentation only)
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Set the input placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the stored choice set
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choice_set = choices;
        self
    }

    /// Sort key honoring the ordering invariant: `order`, then `field_name`
    pub fn ordering_key(&self) -> (u32, &str) {
        (self.order, self.field_name.as_str())
    }
}

/// A named search panel bound to one entity type
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Assigned by the store on insert
    #[serde(default)]
    pub id: u64,

    pub name: String,
    /// Stable entity type key, e.g. "blog.post"
    pub entity_type: String,
    #[serde(default)]
    pub position: PanelPosition,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_true")]
    pub show_results_count: bool,
    /// Upper bound on rows fetched per request
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_placeholder() -> String {
    "Search...".to_string()
}

fn default_results_limit() -> usize {
    10
}

impl SearchConfig {
    /// Create an active configuration bound to an entity type
    pub fn new(name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            entity_type: entity_type.into(),
            position: PanelPosition::default(),
            is_active: true,
            placeholder: default_placeholder(),
            show_results_count: true,
            results_limit: default_results_limit(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the panel position
    pub fn with_position(mut self, position: PanelPosition) -> Self {
        self.position = position;
        self
    }

    /// Set the per-request result limit
    pub fn with_results_limit(mut self, limit: usize) -> Self {
        self.results_limit = limit;
        self
    }

    /// Set whether the panel displays the total match count
    pub fn with_show_results_count(mut self, show: bool) -> Self {
        self.show_results_count = show;
        self
    }

    /// Deactivate this configuration
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let field = FieldDescriptor::new("title", "Title", FieldKind::Text);
        assert!(field.is_visible);
        assert!(field.is_searchable);
        assert!(!field.is_required);
        assert_eq!(field.order, 0);
        assert!(field.choice_set.is_empty());
    }

    #[test]
    fn test_descriptor_builder() {
        let field = FieldDescriptor::new("status", "Status", FieldKind::SingleChoice)
            .with_order(3)
            .searchable(false)
            .with_choices(vec![Choice::new("PB", "Published")]);

        assert_eq!(field.order, 3);
        assert!(!field.is_searchable);
        assert_eq!(field.choice_set.len(), 1);
    }

    #[test]
    fn test_ordering_key_tie_break() {
        let a = FieldDescriptor::new("beta", "B", FieldKind::Text).with_order(1);
        let b = FieldDescriptor::new("alpha", "A", FieldKind::Text).with_order(1);
        // Same order: ascending field_name decides
        assert!(b.ordering_key() < a.ordering_key());
    }

    #[test]
    fn test_config_defaults() {
        let config = SearchConfig::new("Blog search", "blog.post");
        assert!(config.is_active);
        assert_eq!(config.results_limit, 10);
        assert_eq!(config.position, PanelPosition::Top);
        assert!(config.show_results_count);
        assert_eq!(config.placeholder, "Search...");
    }

    #[test]
    fn test_config_builder() {
        let config = SearchConfig::new("Catalog", "shop.product")
            .with_position(PanelPosition::Left)
            .with_results_limit(25)
            .inactive();

        assert_eq!(config.position, PanelPosition::Left);
        assert_eq!(config.results_limit, 25);
        assert!(!config.is_active);
    }

    #[test]
    fn test_serialization() {
        let field = FieldDescriptor::new("price", "Price", FieldKind::numeric_range())
            .with_order(2);
        let json = serde_json::to_string(&field).unwrap();
        let deserialized: FieldDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.field_name, "price");
        assert_eq!(deserialized.kind, FieldKind::numeric_range());
    }
}
