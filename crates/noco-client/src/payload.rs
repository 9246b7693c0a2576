//! CRUD Payload Adapter
//!
//! Shapes write bodies for the bulk-oriented records endpoint and unwraps
//! single-record answers from its always-array responses.

use noco_core::{is_primary_key, Row, Scalar, PRIMARY_KEY};
use noco_queries::{
    strip_table_prefix, Comparison, Connector, OperatorKind, Predicate, QueryDescriptor,
};
use serde_json::Value;

/// Write input with the caller's intent stated explicitly
#[derive(Debug, Clone, PartialEq)]
pub enum WriteInput {
    /// One record; the response's first element is returned
    Single(Row),
    /// Several records; the full response is returned
    Bulk(Vec<Row>),
}

impl WriteInput {
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// True only for a bulk input with no records
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Bulk(rows) if rows.is_empty())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Bulk(rows) => rows.len(),
        }
    }

    /// Outgoing body: always an array
    pub fn into_payload(self) -> Value {
        let rows = match self {
            Self::Single(row) => vec![row],
            Self::Bulk(rows) => rows,
        };
        Value::Array(rows.into_iter().map(Row::into_value).collect())
    }
}

impl From<Row> for WriteInput {
    fn from(row: Row) -> Self {
        Self::Single(row)
    }
}

impl From<Vec<Row>> for WriteInput {
    fn from(rows: Vec<Row>) -> Self {
        Self::Bulk(rows)
    }
}

/// Element 0 of an array response; anything else is returned unchanged
pub fn unwrap_single(response: Value) -> Value {
    match response {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        other => other,
    }
}

/// Find the primary key a write should target.
///
/// Only comparisons at the top of the tree count: a key buried in a
/// nested group does not identify a single record. The comparison must
/// use equality and, unless it is the first sibling, be joined with AND.
pub fn find_primary_key(descriptor: &QueryDescriptor) -> Option<Scalar> {
    match descriptor.filter()? {
        Predicate::Comparison(comparison) => key_from(comparison, true),
        Predicate::Group(group) => group
            .children
            .iter()
            .enumerate()
            .find_map(|(index, child)| match child {
                Predicate::Comparison(comparison) => key_from(comparison, index == 0),
                Predicate::Group(_) => None,
            }),
    }
}

fn key_from(comparison: &Comparison, first: bool) -> Option<Scalar> {
    if !first && comparison.connector == Connector::Or {
        return None;
    }
    if !is_primary_key(strip_table_prefix(&comparison.column)) {
        return None;
    }
    if OperatorKind::from_token(&comparison.operator) != OperatorKind::Eq {
        return None;
    }
    if comparison.value.is_blank() {
        return None;
    }
    Some(comparison.value.clone())
}

/// `[{...fields, Id: key}]`
pub fn update_payload(fields: Row, key: &Scalar) -> Value {
    let mut row = fields;
    row.insert(PRIMARY_KEY, key.to_json());
    Value::Array(vec![row.into_value()])
}

/// `[{Id: key}]`
pub fn delete_payload(key: &Scalar) -> Value {
    Value::Array(vec![Row::new().with(PRIMARY_KEY, key.to_json()).into_value()])
}
