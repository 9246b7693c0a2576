//! # noco-queries
//!
//! Query layer for NocoDB RS.
//!
//! This crate turns composable query descriptions into the parameters the
//! NocoDB records API expects.
//!
//! ## Structure
//!
//! - `predicate` - Predicate tree of comparisons and nested groups
//! - `filters` - Operator translation and column qualifier handling
//! - `sorts` - Sort keys and directions
//! - `query` - The per-request query descriptor
//! - `builder` - Fluent API for constructing descriptors
//! - `compiler` - The `where` dialect compiler
//! - `params` - Outbound request parameters
//!
//! ## Example
//!
//! ```
//! use noco_queries::{QueryBuilder, QueryCompiler, WhereCompiler};
//!
//! let query = QueryBuilder::table("leads")
//!     .where_eq("status", "active")
//!     .where_group(|g| g.where_op("age", ">", 18).or_where_op("age", "<", 10))
//!     .order_by_desc("age")
//!     .limit(25)
//!     .build();
//!
//! let params = WhereCompiler.build_params(&query);
//! assert_eq!(
//!     params.where_clause.as_deref(),
//!     Some("(status,eq,active)~and((age,gt,18)~or(age,lt,10))")
//! );
//! assert_eq!(params.sort.as_deref(), Some("-age"));
//! ```

pub mod predicate;
pub mod filters;
pub mod sorts;
pub mod query;
pub mod builder;
pub mod compiler;
pub mod params;

// Re-exports for convenience
pub use predicate::{Comparison, Connector, Group, Predicate};
pub use filters::{strip_table_prefix, OperatorKind};
pub use sorts::{SortCriterion, SortDirection, SortOrder};
pub use query::QueryDescriptor;
pub use builder::{GroupBuilder, QueryBuilder};
pub use compiler::{compile, QueryCompiler, WhereCompiler};
pub use params::ParameterSet;
