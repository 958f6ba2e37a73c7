//! Choice introspection
//!
//! Resolves the (value, label) set a selection-style field offers. Choice
//! lists populate UI widgets and are advisory, so every introspection
//! failure degrades to the descriptor's stored set instead of erroring.

use tracing::debug;

use crate::entity::{AttributeKind, EntityRegistry, EntitySource};
use crate::schema::{Choice, FieldDescriptor};

/// Cap on related entities listed for relation-typed attributes
pub const RELATED_CHOICES_LIMIT: usize = 100;

/// Resolve the choice set for one field
///
/// Resolution order, first success wins:
/// 1. choices declared on the attribute's metadata
/// 2. relation target: up to [`RELATED_CHOICES_LIMIT`] related entities,
///    value = id, label = string form
/// 3. boolean attributes: synthesized Yes/No pair
/// 4. the descriptor's stored `choice_set`
pub fn resolve_choices(
    descriptor: &FieldDescriptor,
    source: &dyn EntitySource,
    registry: &EntityRegistry,
) -> Vec<Choice> {
    let Some(attribute) = source.metadata().get(&descriptor.field_name) else {
        debug!(
            field = %descriptor.field_name,
            "attribute not found on entity type, using stored choices"
        );
        return descriptor.choice_set.clone();
    };

    if !attribute.choices.is_empty() {
        return attribute.choices.clone();
    }

    match &attribute.kind {
        AttributeKind::Relation { target } => match registry.resolve(target) {
            Ok(related) => related
                .records()
                .into_iter()
                .take(RELATED_CHOICES_LIMIT)
                .map(|entity| Choice::new(entity.id.to_string(), entity.title))
                .collect(),
            Err(_) => {
                debug!(
                    field = %descriptor.field_name,
                    target = %target,
                    "relation target not registered, using stored choices"
                );
                descriptor.choice_set.clone()
            }
        },
        AttributeKind::Bool => vec![
            Choice::new("true", "Yes"),
            Choice::new("false", "No"),
        ],
        _ => descriptor.choice_set.clone(),
    }
}
