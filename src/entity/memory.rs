//! In-memory entity source
//!
//! Backs the demo binary and tests. Collections are built once at startup
//! and read-only afterwards, matching the engine's request model.

use super::{Entity, EntityMetadata, EntitySource};

/// Entity source backed by a plain in-memory collection
pub struct MemorySource {
    metadata: EntityMetadata,
    records: Vec<Entity>,
}

impl MemorySource {
    pub fn new(metadata: EntityMetadata) -> Self {
        Self {
            metadata,
            records: Vec::new(),
        }
    }

    /// Add a record to the collection
    pub fn with_record(mut self, entity: Entity) -> Self {
        self.records.push(entity);
        self
    }

    /// Add several records to the collection
    pub fn with_records(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.records.extend(entities);
        self
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl EntitySource for MemorySource {
    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn records(&self) -> Vec<Entity> {
        self.records.clone()
    }
}
