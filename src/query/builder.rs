//! Predicate builder
//!
//! Translates raw request parameters into a [`Predicate`] tree according to
//! a configuration's field descriptors. Pure with respect to persisted data:
//! only the passed-in descriptors and raw input are read.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::schema::{FieldDescriptor, FieldKind};

use super::predicate::{Bound, Clause, Op, Predicate};

/// Raw value submitted for one field: `string | string[]` on the wire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    One(String),
    Many(Vec<String>),
}

impl RawValue {
    /// View as a single value; lists yield their first element
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::One(s) => Some(s.as_str()),
            RawValue::Many(values) => values.first().map(String::as_str),
        }
    }

    /// View as a list of non-empty values
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            RawValue::One(s) => {
                if s.is_empty() {
                    Vec::new()
                } else {
                    vec![s.as_str()]
                }
            }
            RawValue::Many(values) => values
                .iter()
                .filter(|v| !v.is_empty())
                .map(String::as_str)
                .collect(),
        }
    }
}

/// Raw field input keyed by field name (range bounds use `{name}_min`/`{name}_max`)
pub type SearchInput = HashMap<String, RawValue>;

/// Builds filter predicates from descriptors and raw input
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build the composed predicate for one request
    ///
    /// Fields are interpreted in the given descriptor order; fields with
    /// `is_searchable = false` never contribute. A field without raw input
    /// contributes no clause. Malformed range bounds fail the whole request.
    pub fn build(
        descriptors: &[FieldDescriptor],
        input: &SearchInput,
        date_format: &str,
    ) -> Result<Predicate> {
        let mut clauses = Vec::new();

        for descriptor in descriptors.iter().filter(|d| d.is_searchable) {
            match &descriptor.kind {
                FieldKind::Text => {
                    if let Some(clause) = Self::text_clause(descriptor, input) {
                        clauses.push(clause);
                    }
                }
                FieldKind::SingleChoice => {
                    if let Some(clause) = Self::single_choice_clause(descriptor, input) {
                        clauses.push(clause);
                    }
                }
                FieldKind::MultiChoice => {
                    if let Some(clause) = Self::multi_choice_clause(descriptor, input) {
                        clauses.push(clause);
                    }
                }
                FieldKind::DateRange => {
                    clauses.extend(Self::date_bounds(descriptor, input, date_format)?);
                }
                FieldKind::NumericRange { .. } => {
                    clauses.extend(Self::numeric_bounds(descriptor, input)?);
                }
            }
        }

        Ok(Predicate::conjunction(clauses))
    }

    fn text_clause(descriptor: &FieldDescriptor, input: &SearchInput) -> Option<Predicate> {
        let value = input.get(&descriptor.field_name)?.as_str()?;
        if value.is_empty() {
            return None;
        }
        Some(Predicate::Clause(Clause::contains(
            &descriptor.field_name,
            value,
        )))
    }

    fn single_choice_clause(
        descriptor: &FieldDescriptor,
        input: &SearchInput,
    ) -> Option<Predicate> {
        let value = input.get(&descriptor.field_name)?.as_str()?;
        if value.is_empty() {
            return None;
        }
        Some(Predicate::Clause(Clause::equals(
            &descriptor.field_name,
            value,
        )))
    }

    fn multi_choice_clause(
        descriptor: &FieldDescriptor,
        input: &SearchInput,
    ) -> Option<Predicate> {
        let values = input.get(&descriptor.field_name)?.as_list();
        if values.is_empty() {
            return None;
        }
        Some(Predicate::Or(
            values
                .into_iter()
                .map(|v| Predicate::Clause(Clause::equals(&descriptor.field_name, v)))
                .collect(),
        ))
    }

    /// Each bound is considered independently of the opposite one
    fn date_bounds(
        descriptor: &FieldDescriptor,
        input: &SearchInput,
        date_format: &str,
    ) -> Result<Vec<Predicate>> {
        let field = &descriptor.field_name;
        let mut clauses = Vec::new();

        if let Some(raw) = bound_input(input, field, "min") {
            let date = parse_date(field, raw, date_format)?;
            clauses.push(Predicate::Clause(Clause::new(
                field,
                Op::Gte(Bound::Date(date)),
            )));
        }
        if let Some(raw) = bound_input(input, field, "max") {
            let date = parse_date(field, raw, date_format)?;
            clauses.push(Predicate::Clause(Clause::new(
                field,
                Op::Lte(Bound::Date(date)),
            )));
        }

        Ok(clauses)
    }

    fn numeric_bounds(
        descriptor: &FieldDescriptor,
        input: &SearchInput,
    ) -> Result<Vec<Predicate>> {
        let field = &descriptor.field_name;
        let mut clauses = Vec::new();

        if let Some(raw) = bound_input(input, field, "min") {
            let number = parse_number(field, raw)?;
            clauses.push(Predicate::Clause(Clause::new(
                field,
                Op::Gte(Bound::Number(number)),
            )));
        }
        if let Some(raw) = bound_input(input, field, "max") {
            let number = parse_number(field, raw)?;
            clauses.push(Predicate::Clause(Clause::new(
                field,
                Op::Lte(Bound::Number(number)),
            )));
        }

        Ok(clauses)
    }
}

fn bound_input<'a>(input: &'a SearchInput, field: &str, suffix: &str) -> Option<&'a str> {
    input
        .get(&format!("{}_{}", field, suffix))
        .and_then(RawValue::as_str)
        .filter(|v| !v.is_empty())
}

fn parse_date(field: &str, raw: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, format).map_err(|_| SiftError::MalformedDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>().map_err(|_| SiftError::MalformedNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
