//! Filter predicate tree
//!
//! A per-request, side-effect-free representation of the composed filter.
//! Field clauses combine conjunctively; multi-choice candidates combine
//! disjunctively beneath the conjunction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, FieldValue};

/// Operand of a range comparison
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    Number(f64),
    Date(NaiveDate),
}

/// Comparison applied by a single clause
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Op {
    /// Exact match against a raw candidate value
    Equals(String),
    /// Case-insensitive substring containment; the needle is pre-lowercased
    Contains(String),
    Gte(Bound),
    Lte(Bound),
}

/// One field's contribution to the filter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub field: String,
    pub op: Op,
}

impl Clause {
    pub fn new(field: impl Into<String>, op: Op) -> Self {
        Self {
            field: field.into(),
            op,
        }
    }

    /// Case-insensitive containment clause
    pub fn contains(field: impl Into<String>, needle: &str) -> Self {
        Self::new(field, Op::Contains(needle.to_lowercase()))
    }

    /// Equality clause against a raw value
    pub fn equals(field: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(field, Op::Equals(raw.into()))
    }

    fn matches(&self, entity: &Entity) -> bool {
        let value = entity.value(&self.field).unwrap_or(&FieldValue::Null);
        match &self.op {
            Op::Equals(raw) => value.matches_raw(raw),
            Op::Contains(needle) => value
                .as_text()
                .map(|s| s.to_lowercase().contains(needle))
                .unwrap_or(false),
            Op::Gte(bound) => compare_bound(value, bound).map(|o| o.is_ge()).unwrap_or(false),
            Op::Lte(bound) => compare_bound(value, bound).map(|o| o.is_le()).unwrap_or(false),
        }
    }
}

fn compare_bound(value: &FieldValue, bound: &Bound) -> Option<std::cmp::Ordering> {
    match (value, bound) {
        (FieldValue::Number(n), Bound::Number(b)) => n.partial_cmp(b),
        (FieldValue::Date(d), Bound::Date(b)) => Some(d.cmp(b)),
        // Kind mismatch never matches
        _ => None,
    }
}

/// Composed filter predicate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Matches every entity (no searchable input supplied)
    All,
    Clause(Clause),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    /// Evaluate this predicate against an entity
    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Clause(clause) => clause.matches(entity),
            Predicate::And(parts) => parts.iter().all(|p| p.matches(entity)),
            Predicate::Or(parts) => parts.iter().any(|p| p.matches(entity)),
        }
    }

    /// Collapse a clause list into the tightest tree
    pub fn conjunction(mut clauses: Vec<Predicate>) -> Predicate {
        match clauses.len() {
            0 => Predicate::All,
            1 => clauses.remove(0),
            _ => Predicate::And(clauses),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Entity {
        Entity::new(1, "Desk lamp")
            .set("name", FieldValue::Text("Desk Lamp".to_string()))
            .set("status", FieldValue::Text("active".to_string()))
            .set("price", FieldValue::Number(49.9))
            .set(
                "created",
                FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            )
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let clause = Clause::contains("name", "LAMP");
        assert!(clause.matches(&lamp()));

        let miss = Clause::contains("name", "chair");
        assert!(!miss.matches(&lamp()));
    }

    #[test]
    fn test_contains_on_non_text_never_matches() {
        let clause = Clause::contains("price", "49");
        assert!(!clause.matches(&lamp()));
    }

    #[test]
    fn test_equals_clause() {
        assert!(Clause::equals("status", "active").matches(&lamp()));
        assert!(!Clause::equals("status", "inactive").matches(&lamp()));
        assert!(Clause::equals("price", "49.9").matches(&lamp()));
    }

    #[test]
    fn test_absent_field_never_matches() {
        let clause = Clause::equals("missing", "anything");
        assert!(!clause.matches(&lamp()));
    }

    #[test]
    fn test_range_clauses() {
        let gte = Clause::new("price", Op::Gte(Bound::Number(40.0)));
        let lte = Clause::new("price", Op::Lte(Bound::Number(40.0)));
        assert!(gte.matches(&lamp()));
        assert!(!lte.matches(&lamp()));

        let date_gte = Clause::new(
            "created",
            Op::Gte(Bound::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        );
        assert!(date_gte.matches(&lamp()));
    }

    #[test]
    fn test_range_kind_mismatch_never_matches() {
        // Date bound against a numeric value
        let clause = Clause::new(
            "price",
            Op::Gte(Bound::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())),
        );
        assert!(!clause.matches(&lamp()));
    }

    #[test]
    fn test_and_or_semantics() {
        let both = Predicate::And(vec![
            Predicate::Clause(Clause::contains("name", "lamp")),
            Predicate::Clause(Clause::equals("status", "active")),
        ]);
        assert!(both.matches(&lamp()));

        let either = Predicate::Or(vec![
            Predicate::Clause(Clause::equals("status", "archived")),
            Predicate::Clause(Clause::equals("status", "active")),
        ]);
        assert!(either.matches(&lamp()));

        let neither = Predicate::Or(vec![]);
        assert!(!neither.matches(&lamp()));
    }

    #[test]
    fn test_conjunction_collapse() {
        assert_eq!(Predicate::conjunction(vec![]), Predicate::All);

        let single = Predicate::conjunction(vec![Predicate::Clause(Clause::equals(
            "status", "active",
        ))]);
        assert!(matches!(single, Predicate::Clause(_)));

        let multiple = Predicate::conjunction(vec![
            Predicate::Clause(Clause::equals("status", "active")),
            Predicate::Clause(Clause::contains("name", "lamp")),
        ]);
        assert!(matches!(multiple, Predicate::And(ref v) if v.len() == 2));
    }
}
