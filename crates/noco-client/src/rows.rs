//! Row Result Mapper
//!
//! List responses normally arrive as `{list: [...], pageInfo: {...}}`.
//! Some endpoint variants return a bare array instead, which is taken as
//! the row list directly. Field names are passed through untouched.

use noco_core::{PageInfo, Row};
use serde_json::Value;

/// Rows of one list response plus its page metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub page_info: PageInfo,
}

impl RowSet {
    pub fn from_response(response: Value) -> Self {
        let page_info = PageInfo::from_response(&response);
        Self {
            rows: extract_rows(response),
            page_info,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

/// Pull the row sequence out of a list response
pub fn extract_rows(response: Value) -> Vec<Row> {
    let list = match response {
        Value::Object(mut envelope) => match envelope.remove("list") {
            Some(list) => list,
            None => Value::Object(envelope),
        },
        other => other,
    };

    match list {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(Row::from(map)),
                other => {
                    tracing::warn!(value = %other, "skipping non-object row in list response");
                    None
                }
            })
            .collect(),
        Value::Object(map) => vec![Row::from(map)],
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(value = %other, "list response holds no rows");
            Vec::new()
        }
    }
}
