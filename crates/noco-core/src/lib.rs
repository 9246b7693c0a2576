//! # noco-core
//!
//! Core types and utilities for NocoDB RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Error taxonomy and result alias
//! - Client configuration
//! - Scalar values and rows
//! - Page metadata and paginated results

pub mod error;
pub mod result;
pub mod types;
pub mod pagination;
pub mod config;

pub use error::*;
pub use result::*;
pub use types::*;
pub use pagination::*;
pub use config::{AuthScheme, ClientConfig, ConfigError};
