//! Query Parameter Builder
//!
//! The canonical request shape handed to a transport's list operation.
//! Values are raw: nothing here is URL-encoded. Transports must encode
//! every parameter except `where`, whose parentheses, commas and tildes
//! have to reach the remote API verbatim.

use serde::Serialize;

use crate::query::QueryDescriptor;

pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";
pub const SORT: &str = "sort";
pub const WHERE: &str = "where";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParameterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
}

impl ParameterSet {
    /// Build parameters for a descriptor and its compiled filter.
    ///
    /// - `limit` only when set and nonzero
    /// - `offset` whenever set, zero included
    /// - `sort` only when there are sort keys
    /// - `where` only when the filter compiled to something
    pub fn build(descriptor: &QueryDescriptor, where_clause: Option<String>) -> Self {
        Self {
            limit: descriptor.limit.filter(|limit| *limit > 0),
            offset: descriptor.offset,
            sort: descriptor.sorts.to_param(),
            where_clause: where_clause.filter(|w| !w.is_empty()),
        }
    }

    /// Minimal request used only to read `pageInfo.totalRows`
    pub fn probe(where_clause: Option<String>) -> Self {
        Self {
            limit: Some(1),
            offset: Some(0),
            sort: None,
            where_clause: where_clause.filter(|w| !w.is_empty()),
        }
    }

    /// Parameters that follow standard query-string encoding, in order
    pub fn encoded_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push((LIMIT, limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push((OFFSET, offset.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push((SORT, sort.clone()));
        }
        pairs
    }

    /// The raw `where` value, to be appended without encoding
    pub fn raw_where(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.offset.is_none()
            && self.sort.is_none()
            && self.where_clause.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;

    #[test]
    fn test_limit_zero_is_omitted() {
        let descriptor = QueryBuilder::table("leads").limit(0).build();
        let params = ParameterSet::build(&descriptor, None);
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_offset_zero_is_kept() {
        let descriptor = QueryBuilder::table("leads").offset(0).build();
        let params = ParameterSet::build(&descriptor, None);
        assert_eq!(params.offset, Some(0));
    }

    #[test]
    fn test_unset_offset_is_omitted() {
        let descriptor = QueryBuilder::table("leads").limit(5).build();
        let params = ParameterSet::build(&descriptor, None);
        assert_eq!(params.offset, None);
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn test_empty_where_is_never_emitted() {
        let descriptor = QueryBuilder::table("leads").build();
        assert_eq!(ParameterSet::build(&descriptor, None).where_clause, None);
        assert_eq!(
            ParameterSet::build(&descriptor, Some(String::new())).where_clause,
            None
        );
        assert!(ParameterSet::build(&descriptor, None).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let descriptor = QueryBuilder::table("leads")
            .order_by_desc("age")
            .order_by_asc("name")
            .limit(25)
            .offset(50)
            .build();
        let params = ParameterSet::build(&descriptor, Some("(status,eq,active)".into()));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "limit": 25,
                "offset": 50,
                "sort": "-age,name",
                "where": "(status,eq,active)"
            })
        );
    }

    #[test]
    fn test_absent_keys_are_not_serialized() {
        let value = serde_json::to_value(ParameterSet::default()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }

    #[test]
    fn test_probe_shape() {
        let params = ParameterSet::probe(Some("(category,eq,all)".into()));
        assert_eq!(params.limit, Some(1));
        assert_eq!(params.offset, Some(0));
        assert_eq!(params.sort, None);
        assert_eq!(params.raw_where(), Some("(category,eq,all)"));
    }

    #[test]
    fn test_encoded_pairs_exclude_where() {
        let params = ParameterSet {
            limit: Some(10),
            offset: Some(0),
            sort: Some("-age".into()),
            where_clause: Some("(a,eq,1)".into()),
        };
        assert_eq!(
            params.encoded_pairs(),
            vec![
                ("limit", "10".to_string()),
                ("offset", "0".to_string()),
                ("sort", "-age".to_string()),
            ]
        );
    }
}
