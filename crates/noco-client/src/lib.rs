//! # noco-client
//!
//! Query execution layer for NocoDB RS.
//!
//! This crate runs query descriptors against the NocoDB records API:
//!
//! - Transport contract and its reqwest implementation
//! - Row mapping for list responses
//! - Pagination with concurrent count probe and data fetch
//! - Create, update, and delete payload shaping
//!
//! ## Example
//!
//! ```ignore
//! use noco_client::{NocoClient, WriteInput};
//! use noco_core::{ClientConfig, Row};
//! use noco_queries::QueryBuilder;
//!
//! let client = NocoClient::from_config(ClientConfig::from_env()?)?;
//!
//! let query = QueryBuilder::table("m_leads")
//!     .where_eq("status", "active")
//!     .order_by_desc("CreatedAt")
//!     .build();
//! let page = client.paginate(&query, 25, 1).await?;
//!
//! let created = client
//!     .create("m_leads", WriteInput::Single(Row::new().with("name", "Ann")))
//!     .await?;
//! ```

pub mod transport;
pub mod http;
pub mod rows;
pub mod payload;
pub mod executor;

// Re-exports
pub use transport::RecordTransport;
pub use http::HttpTransport;
pub use rows::{extract_rows, RowSet};
pub use payload::{find_primary_key, unwrap_single, WriteInput};
pub use executor::QueryExecutor;

/// Executor over HTTP with the default `where` compiler
pub type NocoClient = QueryExecutor<HttpTransport>;
