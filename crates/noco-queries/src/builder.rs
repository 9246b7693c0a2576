//! Query Builder
//!
//! Fluent API for assembling a `QueryDescriptor`. Conditions added at the
//! top level become the children of the root group.

use noco_core::types::Scalar;

use crate::filters::tokens;
use crate::predicate::{Comparison, Connector, Group, Predicate};
use crate::query::QueryDescriptor;
use crate::sorts::{SortCriterion, SortDirection, SortOrder};

/// Builder for a nested group of conditions
#[derive(Debug, Clone, Default)]
pub struct GroupBuilder {
    children: Vec<Predicate>,
}

impl GroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_comparison(
        mut self,
        connector: Connector,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        let mut comparison = Comparison::new(column, operator, value);
        comparison.connector = connector;
        self.children.push(Predicate::Comparison(comparison));
        self
    }

    fn push_group<F>(mut self, connector: Connector, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        let group = Group {
            children: f(GroupBuilder::new()).children,
            connector,
        };
        self.children.push(Predicate::Group(group));
        self
    }

    /// `column = value`, joined with AND
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.push_comparison(Connector::And, column, tokens::EQ, value)
    }

    /// Arbitrary operator, joined with AND
    pub fn where_op(
        self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        self.push_comparison(Connector::And, column, operator, value)
    }

    /// `column = value`, joined with OR
    pub fn or_where(self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.push_comparison(Connector::Or, column, tokens::EQ, value)
    }

    /// Arbitrary operator, joined with OR
    pub fn or_where_op(
        self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        self.push_comparison(Connector::Or, column, operator, value)
    }

    /// Nested group, joined with AND
    pub fn where_group<F>(self, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.push_group(Connector::And, f)
    }

    /// Nested group, joined with OR
    pub fn or_where_group<F>(self, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.push_group(Connector::Or, f)
    }

    /// Append a prebuilt predicate with its own connector
    pub fn where_predicate(mut self, predicate: Predicate) -> Self {
        self.children.push(predicate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Root predicate, `None` when nothing was added
    pub fn build(self) -> Option<Predicate> {
        if self.children.is_empty() {
            None
        } else {
            Some(Predicate::group(self.children))
        }
    }
}

/// Builder for constructing query descriptors fluently
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    table: String,
    conditions: GroupBuilder,
    sorts: SortOrder,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl QueryBuilder {
    /// Start a query against a table
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    // Filter methods

    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.conditions = self.conditions.where_eq(column, value);
        self
    }

    pub fn where_op(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        self.conditions = self.conditions.where_op(column, operator, value);
        self
    }

    pub fn or_where(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.conditions = self.conditions.or_where(column, value);
        self
    }

    pub fn or_where_op(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Scalar>,
    ) -> Self {
        self.conditions = self.conditions.or_where_op(column, operator, value);
        self
    }

    pub fn where_group<F>(mut self, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.conditions = self.conditions.where_group(f);
        self
    }

    pub fn or_where_group<F>(mut self, f: F) -> Self
    where
        F: FnOnce(GroupBuilder) -> GroupBuilder,
    {
        self.conditions = self.conditions.or_where_group(f);
        self
    }

    pub fn where_predicate(mut self, predicate: Predicate) -> Self {
        self.conditions = self.conditions.where_predicate(predicate);
        self
    }

    /// Filter by primary key
    pub fn where_id(self, id: impl Into<Scalar>) -> Self {
        self.where_eq(noco_core::types::PRIMARY_KEY, id)
    }

    // Sort methods

    /// Append a sort key
    pub fn order_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sorts.add(SortCriterion::new(column, direction));
        self
    }

    pub fn order_by_asc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Asc)
    }

    pub fn order_by_desc(self, column: impl Into<String>) -> Self {
        self.order_by(column, SortDirection::Desc)
    }

    /// Replace all sort keys
    pub fn sort(mut self, sorts: SortOrder) -> Self {
        self.sorts = sorts;
        self
    }

    // Window methods

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> QueryDescriptor {
        QueryDescriptor {
            table: self.table,
            filter: self.conditions.build(),
            sorts: self.sorts,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
