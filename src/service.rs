//! Search service
//!
//! Orchestrates one search request: resolve the configuration and entity
//! type, interpret raw input into a predicate, execute, and project the
//! matches. Side-effect-free per request; all state it reads is owned by
//! the store and the registry.

use std::sync::Arc;

use tracing::{debug, info};

use crate::choices::resolve_choices;
use crate::config::SearchSettings;
use crate::entity::EntityRegistry;
use crate::error::{Result, SiftError};
use crate::query::{PredicateBuilder, QueryExecutor, ResultRecord, SearchInput};
use crate::schema::{Choice, FieldDescriptor, SearchConfig};
use crate::store::ConfigStore;

/// One search request against a named configuration
#[derive(Clone, Debug)]
pub struct SearchRequest {
    pub config_id: u64,
    /// Registry id of the entity type the caller expects the config to target
    pub content_type_id: u32,
    pub search_data: SearchInput,
    pub limit: Option<usize>,
    pub order_by: Option<String>,
}

/// Outcome of a successful search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub results: Vec<ResultRecord>,
    pub total: u64,
    pub has_more: bool,
    pub show_count: bool,
    pub search_id: String,
}

/// Resolved choice list for one field
#[derive(Clone, Debug)]
pub struct FieldChoices {
    pub choices: Vec<Choice>,
    pub field_type: &'static str,
}

/// A configuration together with its visible descriptors, for panel rendering
#[derive(Clone, Debug)]
pub struct PanelView {
    pub config: SearchConfig,
    pub fields: Vec<FieldDescriptor>,
}

/// Facade over the store, registry and query pipeline
pub struct SearchService {
    store: Arc<ConfigStore>,
    registry: Arc<EntityRegistry>,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(
        store: Arc<ConfigStore>,
        registry: Arc<EntityRegistry>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            store,
            registry,
            settings,
        }
    }

    /// Execute a search request
    ///
    /// The configuration is resolved by explicit `(config_id,
    /// content_type_id)` pair: the config must be active and bound to the
    /// entity type the caller named, otherwise the request is not-found.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let config = self.store.active_config(request.config_id)?;
        let type_id = self.registry.type_id(&config.entity_type)?;
        if type_id != request.content_type_id {
            return Err(SiftError::ConfigNotFound(format!(
                "{} (entity type mismatch)",
                request.config_id
            )));
        }

        let source = self.registry.resolve(&config.entity_type)?;
        let descriptors = self.store.fields_for(config.id);

        let predicate = PredicateBuilder::build(
            &descriptors,
            &request.search_data,
            &self.settings.date_format,
        )?;
        debug!(config_id = config.id, ?predicate, "predicate built");

        // The configuration bounds how many rows a request may fetch
        let limit = request
            .limit
            .unwrap_or(self.settings.default_results_limit)
            .min(config.results_limit);

        let outcome = QueryExecutor::execute(
            source.as_ref(),
            &predicate,
            request.order_by.as_deref(),
            limit,
            0,
        );

        let results: Vec<ResultRecord> = outcome
            .entities
            .iter()
            .map(|entity| ResultRecord::project(entity, &config.entity_type))
            .collect();

        info!(
            config_id = config.id,
            entity_type = %config.entity_type,
            total = outcome.total,
            returned = results.len(),
            "search executed"
        );

        Ok(SearchOutcome {
            results,
            has_more: outcome.total > limit as u64,
            total: outcome.total,
            show_count: config.show_results_count,
            search_id: format!("{}_{}", request.config_id, request.content_type_id),
        })
    }

    /// Resolve the choice list for one field of a configuration
    pub fn field_choices(&self, config_id: u64, field_id: u64) -> Result<FieldChoices> {
        let config = self
            .store
            .config(config_id)
            .ok_or_else(|| SiftError::ConfigNotFound(config_id.to_string()))?;
        let field = self.store.field(config_id, field_id)?;
        let source = self.registry.resolve(&config.entity_type)?;

        let choices = resolve_choices(&field, source.as_ref(), &self.registry);
        Ok(FieldChoices {
            choices,
            field_type: field.kind.as_str(),
        })
    }

    /// Get a configuration with its visible descriptors for panel rendering
    pub fn panel(&self, config_id: u64) -> Result<PanelView> {
        let config = self.store.active_config(config_id)?;
        let fields = self
            .store
            .fields_for(config_id)
            .into_iter()
            .filter(|f| f.is_visible)
            .collect();
        Ok(PanelView { config, fields })
    }
}
