//! Configuration store
//!
//! Holds search configurations and their field descriptors in the same
//! one-to-many shape as the persisted tables: deleting a configuration
//! cascades to its descriptors. Read-mostly; the search path never writes.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::error::{Result, SiftError};
use crate::schema::{FieldDescriptor, SearchConfig};

#[derive(Default)]
struct StoreInner {
    configs: BTreeMap<u64, SearchConfig>,
    fields: BTreeMap<u64, FieldDescriptor>,
    next_config_id: u64,
    next_field_id: u64,
}

/// In-memory store for search configurations and field descriptors
#[derive(Default)]
pub struct ConfigStore {
    inner: RwLock<StoreInner>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a configuration, assigning its id
    pub fn insert_config(&self, mut config: SearchConfig) -> u64 {
        let mut inner = self.inner.write();
        inner.next_config_id += 1;
        let id = inner.next_config_id;
        config.id = id;
        info!(config_id = id, name = %config.name, entity_type = %config.entity_type, "search configuration created");
        inner.configs.insert(id, config);
        id
    }

    /// Insert a field descriptor under an existing configuration
    pub fn insert_field(&self, config_id: u64, mut field: FieldDescriptor) -> Result<u64> {
        let mut inner = self.inner.write();
        if !inner.configs.contains_key(&config_id) {
            return Err(SiftError::ConfigNotFound(config_id.to_string()));
        }
        inner.next_field_id += 1;
        let id = inner.next_field_id;
        field.id = id;
        field.config_id = config_id;
        inner.fields.insert(id, field);
        Ok(id)
    }

    /// Get a configuration by id
    pub fn config(&self, id: u64) -> Option<SearchConfig> {
        self.inner.read().configs.get(&id).cloned()
    }

    /// Get an active configuration by id
    pub fn active_config(&self, id: u64) -> Result<SearchConfig> {
        self.config(id)
            .filter(|c| c.is_active)
            .ok_or_else(|| SiftError::ConfigNotFound(id.to_string()))
    }

    /// Get a configuration by its unique name
    pub fn config_by_name(&self, name: &str) -> Option<SearchConfig> {
        self.inner
            .read()
            .configs
            .values()
            .find(|c| c.name == name)
            .cloned()
    }

    /// Get the canonical active configuration for an entity type
    ///
    /// Resolution policy: the active configuration with the lowest id wins,
    /// so resolution by type alone stays deterministic even if several
    /// active configurations exist for the same type.
    pub fn active_config_for_type(&self, entity_type: &str) -> Option<SearchConfig> {
        self.inner
            .read()
            .configs
            .values()
            .find(|c| c.is_active && c.entity_type == entity_type)
            .cloned()
    }

    /// List a configuration's descriptors ordered by (`order`, `field_name`)
    pub fn fields_for(&self, config_id: u64) -> Vec<FieldDescriptor> {
        let inner = self.inner.read();
        let mut fields: Vec<FieldDescriptor> = inner
            .fields
            .values()
            .filter(|f| f.config_id == config_id)
            .cloned()
            .collect();
        fields.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
        fields
    }

    /// Get one descriptor, verifying it belongs to the configuration
    pub fn field(&self, config_id: u64, field_id: u64) -> Result<FieldDescriptor> {
        self.inner
            .read()
            .fields
            .get(&field_id)
            .filter(|f| f.config_id == config_id)
            .cloned()
            .ok_or(SiftError::FieldNotFound(field_id))
    }

    /// Delete a configuration and cascade to its descriptors
    pub fn delete_config(&self, id: u64) -> bool {
        let mut inner = self.inner.write();
        if inner.configs.remove(&id).is_none() {
            return false;
        }
        let before = inner.fields.len();
        inner.fields.retain(|_, f| f.config_id != id);
        warn!(
            config_id = id,
            cascaded = before - inner.fields.len(),
            "search configuration deleted"
        );
        true
    }

    /// Number of stored configurations
    pub fn config_count(&self) -> usize {
        self.inner.read().configs.len()
    }
}
