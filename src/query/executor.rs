//! Query executor
//!
//! Applies a predicate to an entity source, orders the matches, and
//! truncates to the requested window. Read-only and bounded: one collection
//! scan plus a `<= limit` projection pass.

use std::cmp::Ordering;

use crate::entity::{Entity, EntitySource, FieldValue};

use super::predicate::Predicate;

/// Sort keys a caller may request; anything else falls back to the default.
/// The allow-list is a guard against injection via the sort parameter.
const ALLOWED_ORDERINGS: &[&str] = &["name", "-name", "price", "-price", "created", "-created"];

const DEFAULT_ORDERING: &str = "-created";

/// Execution result before projection
#[derive(Debug)]
pub struct QueryOutcome {
    /// Matches in order, truncated to the window
    pub entities: Vec<Entity>,
    /// Total matches before truncation
    pub total: u64,
}

/// Runs predicates against entity sources
pub struct QueryExecutor;

impl QueryExecutor {
    /// Execute a predicate and return the ordered, truncated matches
    pub fn execute(
        source: &dyn EntitySource,
        predicate: &Predicate,
        order_by: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> QueryOutcome {
        let ordering = Self::resolve_ordering(order_by);

        let mut matches: Vec<Entity> = source
            .records()
            .into_iter()
            .filter(|entity| predicate.matches(entity))
            .collect();
        let total = matches.len() as u64;

        let (field, descending) = split_ordering(ordering);
        // Stable sort keeps the source's order for ties
        matches.sort_by(|a, b| {
            let cmp = compare_values(a.value(field), b.value(field));
            if descending {
                cmp.reverse()
            } else {
                cmp
            }
        });

        let entities = matches.into_iter().skip(offset).take(limit).collect();

        QueryOutcome { entities, total }
    }

    /// Validate a requested sort key against the allow-list
    pub fn resolve_ordering(order_by: Option<&str>) -> &'static str {
        order_by
            .and_then(|raw| ALLOWED_ORDERINGS.iter().find(|o| **o == raw).copied())
            .unwrap_or(DEFAULT_ORDERING)
    }
}

fn split_ordering(ordering: &str) -> (&str, bool) {
    match ordering.strip_prefix('-') {
        Some(field) => (field, true),
        None => (ordering, false),
    }
}

/// Order attribute values; missing or mismatched values sort first
fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
            (FieldValue::Number(x), FieldValue::Number(y)) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
            (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
            (FieldValue::Reference(x), FieldValue::Reference(y)) => x.cmp(y),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            _ => Ordering::Equal,
        },
    }
}
