//! Entity abstraction layer
//!
//! The engine never hard-codes a content model. Every queryable type is
//! registered at startup under a stable key together with an
//! [`EntitySource`] that exposes attribute metadata and a bounded record
//! scan. Resolution is an explicit lookup table, not ambient reflection.

pub mod memory;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::schema::Choice;

pub use memory::MemorySource;

/// A typed attribute value carried by an entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    /// Identifier of a related entity
    Reference(u64),
    Null,
}

impl FieldValue {
    /// Get the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Compare against a raw string submitted by a caller
    ///
    /// Numbers compare numerically so "2" matches 2.0; booleans accept
    /// "true"/"false" in any case; dates compare against ISO form.
    pub fn matches_raw(&self, raw: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == raw,
            FieldValue::Number(n) => raw.parse::<f64>().map(|p| p == *n).unwrap_or(false),
            FieldValue::Bool(b) => {
                raw.eq_ignore_ascii_case(if *b { "true" } else { "false" })
            }
            FieldValue::Date(d) => d.format("%Y-%m-%d").to_string() == raw,
            FieldValue::Reference(id) => raw.parse::<u64>().map(|p| p == *id).unwrap_or(false),
            FieldValue::Null => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Reference(id) => write!(f, "{}", id),
            FieldValue::Null => Ok(()),
        }
    }
}

/// One record of a queryable collection
///
/// `title` is the entity's string form; `url` is present only when the type
/// exposes a canonical-URL capability.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
}

impl Entity {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            url: None,
            values: BTreeMap::new(),
        }
    }

    /// Attach the canonical URL capability
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set an attribute value
    pub fn set(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Get an attribute value
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

/// Primitive kind of an entity attribute
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Bool,
    Text,
    Numeric,
    Date,
    /// Points at another registered entity type
    Relation {
        target: String,
    },
}

/// Per-attribute metadata exposed by an entity source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttributeMeta {
    pub kind: AttributeKind,
    /// Declared fixed value set, if the attribute carries one
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl AttributeMeta {
    pub fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            choices: Vec::new(),
        }
    }

    /// Declare a fixed value set for this attribute
    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }
}

/// Attribute metadata for one entity type
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityMetadata {
    attributes: BTreeMap<String, AttributeMeta>,
}

impl EntityMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute definition
    pub fn attribute(mut self, name: impl Into<String>, meta: AttributeMeta) -> Self {
        self.attributes.insert(name.into(), meta);
        self
    }

    /// Look up an attribute definition
    pub fn get(&self, name: &str) -> Option<&AttributeMeta> {
        self.attributes.get(name)
    }

    /// Check if an attribute exists
    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// Capability interface every registered entity type implements
///
/// `records` is a bounded scan in stable order; sources are read-only from
/// the engine's point of view.
pub trait EntitySource: Send + Sync {
    fn metadata(&self) -> &EntityMetadata;
    fn records(&self) -> Vec<Entity>;
}

struct RegisteredType {
    id: u32,
    source: Arc<dyn EntitySource>,
}

/// Explicit startup-constructed mapping from entity type keys to sources
///
/// Replaces ambient framework-wide model lookup: the engine receives this
/// registry as a dependency and resolves types only through it.
#[derive(Default)]
pub struct EntityRegistry {
    types: BTreeMap<String, RegisteredType>,
    next_id: u32,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source under a stable type key
    ///
    /// New keys get the next monotonic id; re-registering an existing key
    /// replaces its source but keeps the id, so handles held by callers
    /// stay valid.
    pub fn register(&mut self, key: impl Into<String>, source: Arc<dyn EntitySource>) -> u32 {
        let key = key.into();
        match self.types.get_mut(&key) {
            Some(existing) => {
                existing.source = source;
                existing.id
            }
            None => {
                self.next_id += 1;
                let id = self.next_id;
                self.types.insert(key, RegisteredType { id, source });
                id
            }
        }
    }

    /// Resolve a type key to its source
    pub fn resolve(&self, key: &str) -> Result<Arc<dyn EntitySource>> {
        self.types
            .get(key)
            .map(|t| Arc::clone(&t.source))
            .ok_or_else(|| SiftError::UnknownEntityType(key.to_string()))
    }

    /// Get the numeric id assigned to a type key
    pub fn type_id(&self, key: &str) -> Result<u32> {
        self.types
            .get(key)
            .map(|t| t.id)
            .ok_or_else(|| SiftError::UnknownEntityType(key.to_string()))
    }

    /// List registered type keys in stable order
    pub fn keys(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}
