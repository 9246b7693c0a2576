//! Result type alias

use crate::error::NocoError;

/// Standard Result type for NocoDB operations
pub type NocoResult<T> = Result<T, NocoError>;
