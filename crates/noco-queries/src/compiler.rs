//! Filter Compiler
//!
//! Renders a predicate tree into the `where` dialect:
//!
//! ```text
//! (status,eq,active)~and((age,gt,18)~or(age,lt,10))
//! ```
//!
//! Leaves render as `(column,op,value)`. Siblings are joined with `~and` /
//! `~or` taken from the right-hand sibling. A group with two or more
//! non-empty children is parenthesized only when it sits inside another
//! group. Empty groups vanish along with their connector.

use crate::filters::{strip_table_prefix, OperatorKind};
use crate::params::ParameterSet;
use crate::predicate::{Comparison, Group, Predicate};
use crate::query::QueryDescriptor;

/// Turns query descriptors into outbound request parameters
pub trait QueryCompiler: Send + Sync {
    /// Compile a filter tree; `None` when there is nothing to filter on
    fn compile(&self, predicate: Option<&Predicate>) -> Option<String>;

    /// Assemble the full parameter set for a list request
    fn build_params(&self, descriptor: &QueryDescriptor) -> ParameterSet {
        ParameterSet::build(descriptor, self.compile(descriptor.filter()))
    }
}

/// Compiler for the `where` query-string dialect
#[derive(Debug, Clone, Copy, Default)]
pub struct WhereCompiler;

impl QueryCompiler for WhereCompiler {
    fn compile(&self, predicate: Option<&Predicate>) -> Option<String> {
        let predicate = predicate.filter(|p| !p.is_empty())?;
        let compiled = compile_node(predicate, false);
        tracing::debug!(
            leaves = predicate.leaf_count(),
            filter = ?compiled,
            "compiled where clause"
        );
        compiled
    }
}

/// Compile with the `where` dialect
pub fn compile(predicate: Option<&Predicate>) -> Option<String> {
    WhereCompiler.compile(predicate)
}

fn compile_node(predicate: &Predicate, nested: bool) -> Option<String> {
    match predicate {
        Predicate::Comparison(comparison) => Some(compile_comparison(comparison)),
        Predicate::Group(group) => compile_group(group, nested),
    }
}

fn compile_comparison(comparison: &Comparison) -> String {
    format!(
        "({},{},{})",
        strip_table_prefix(&comparison.column),
        OperatorKind::from_token(&comparison.operator),
        comparison.value
    )
}

fn compile_group(group: &Group, nested: bool) -> Option<String> {
    let mut clause = String::new();
    let mut emitted = 0usize;

    for child in &group.children {
        let Some(condition) = compile_node(child, true) else {
            continue;
        };

        if emitted > 0 {
            clause.push('~');
            clause.push_str(child.connector().as_str());
        }
        clause.push_str(&condition);
        emitted += 1;
    }

    match emitted {
        0 => None,
        1 => Some(clause),
        _ if nested => Some(format!("({})", clause)),
        _ => Some(clause),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::QueryBuilder;
    use crate::predicate::Connector;

    fn leaf(column: &str, op: &str, value: impl Into<noco_core::Scalar>) -> Predicate {
        Predicate::comparison(column, op, value)
    }

    #[test]
    fn test_absent_predicate_compiles_to_nothing() {
        assert_eq!(compile(None), None);
    }

    #[test]
    fn test_empty_groups_compile_to_nothing() {
        assert_eq!(compile(Some(&Predicate::group(vec![]))), None);

        let nested_empty = Predicate::group(vec![
            Predicate::group(vec![]),
            Predicate::group(vec![Predicate::group(vec![])]),
        ]);
        assert_eq!(compile(Some(&nested_empty)), None);
    }

    #[test]
    fn test_single_leaf() {
        let p = leaf("status", "=", "active");
        assert_eq!(compile(Some(&p)).as_deref(), Some("(status,eq,active)"));
    }

    #[test]
    fn test_single_leaf_in_root_group_is_not_wrapped() {
        let p = Predicate::group(vec![leaf("status", "=", "active")]);
        assert_eq!(compile(Some(&p)).as_deref(), Some("(status,eq,active)"));
    }

    #[test]
    fn test_qualified_column_is_stripped() {
        let qualified = leaf("leads.Id", "=", 123);
        let bare = leaf("Id", "=", 123);
        assert_eq!(compile(Some(&qualified)), compile(Some(&bare)));
        assert_eq!(compile(Some(&qualified)).as_deref(), Some("(Id,eq,123)"));
    }

    #[test]
    fn test_values_are_not_quoted() {
        let p = Predicate::group(vec![leaf("Id", "=", 123), leaf("type", "=", "vps")]);
        assert_eq!(
            compile(Some(&p)).as_deref(),
            Some("(Id,eq,123)~and(type,eq,vps)")
        );
    }

    #[test]
    fn test_boolean_values() {
        let p = Predicate::group(vec![
            leaf("active", "=", true),
            leaf("archived", "!=", false),
        ]);
        assert_eq!(
            compile(Some(&p)).as_deref(),
            Some("(active,eq,true)~and(archived,neq,false)")
        );
    }

    #[test]
    fn test_flat_or_group() {
        let p = Predicate::group(vec![leaf("a", "=", 1), leaf("b", ">", 2).or()]);
        assert_eq!(compile(Some(&p)).as_deref(), Some("(a,eq,1)~or(b,gt,2)"));
    }

    #[test]
    fn test_first_connector_is_never_emitted() {
        let p = Predicate::group(vec![leaf("a", "=", 1).or(), leaf("b", "=", 2)]);
        assert_eq!(compile(Some(&p)).as_deref(), Some("(a,eq,1)~and(b,eq,2)"));
    }

    #[test]
    fn test_empty_leading_group_contributes_no_connector() {
        let p = Predicate::group(vec![
            Predicate::group(vec![]),
            leaf("a", "=", 1).or(),
            Predicate::group(vec![]).or(),
            leaf("b", "=", 2).or(),
        ]);
        assert_eq!(compile(Some(&p)).as_deref(), Some("(a,eq,1)~or(b,eq,2)"));
    }

    #[test]
    fn test_worked_nesting_example() {
        let descriptor = QueryBuilder::table("leads")
            .where_eq("status", "active")
            .where_group(|g| g.where_op("age", ">", 18).or_where_op("age", "<", 10))
            .build();

        assert_eq!(
            compile(descriptor.filter()).as_deref(),
            Some("(status,eq,active)~and((age,gt,18)~or(age,lt,10))")
        );
    }

    #[test]
    fn test_single_child_nested_group_is_not_wrapped() {
        let descriptor = QueryBuilder::table("leads")
            .where_eq("status", "active")
            .or_where_group(|g| g.where_op("age", ">", 18))
            .build();

        assert_eq!(
            compile(descriptor.filter()).as_deref(),
            Some("(status,eq,active)~or(age,gt,18)")
        );
    }

    #[test]
    fn test_mixed_precedence_at_depth() {
        // a AND (b OR (c AND d))
        let p = Predicate::group(vec![
            leaf("a", "=", 1),
            Predicate::Group(Group {
                children: vec![
                    leaf("b", "=", 2),
                    Predicate::Group(Group {
                        children: vec![leaf("c", "=", 3), leaf("d", "=", 4)],
                        connector: Connector::Or,
                    }),
                ],
                connector: Connector::And,
            }),
        ]);

        assert_eq!(
            compile(Some(&p)).as_deref(),
            Some("(a,eq,1)~and((b,eq,2)~or((c,eq,3)~and(d,eq,4)))")
        );
    }

    #[test]
    fn test_unknown_operator_compiles_as_eq() {
        let p = leaf("name", "sounds like", "Smith");
        assert_eq!(compile(Some(&p)).as_deref(), Some("(name,eq,Smith)"));
    }

    #[test]
    fn test_like_operators() {
        let p = Predicate::group(vec![
            leaf("name", "like", "%smith%"),
            leaf("email", "not like", "%@spam.com"),
        ]);
        assert_eq!(
            compile(Some(&p)).as_deref(),
            Some("(name,like,%smith%)~and(email,nlike,%@spam.com)")
        );
    }

    #[test]
    fn test_build_params_via_trait() {
        let descriptor = QueryBuilder::table("leads")
            .where_eq("status", "active")
            .order_by_desc("age")
            .limit(10)
            .offset(0)
            .build();

        let params = WhereCompiler.build_params(&descriptor);
        assert_eq!(params.limit, Some(10));
        assert_eq!(params.offset, Some(0));
        assert_eq!(params.sort.as_deref(), Some("-age"));
        assert_eq!(params.where_clause.as_deref(), Some("(status,eq,active)"));
    }
}
