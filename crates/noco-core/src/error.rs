//! Core error types for NocoDB RS
//!
//! Two kinds of failure reach callers: local contract violations raised
//! before any request is sent, and remote failures passed through from
//! the transport untouched.

use thiserror::Error;

use crate::config::ConfigError;

/// Core error type for all NocoDB operations
#[derive(Error, Debug)]
pub enum NocoError {
    /// A write was attempted without a resolvable primary key.
    /// Raised locally; no request has been issued.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The remote API answered with a non-2xx status
    #[error("NocoDB API error ({status_code}): {body}")]
    RemoteApi { status_code: u16, body: String },

    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl NocoError {
    /// Build an `InvalidOperation` error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }

    /// Build a `RemoteApi` error
    pub fn remote(status_code: u16, body: impl Into<String>) -> Self {
        Self::RemoteApi {
            status_code,
            body: body.into(),
        }
    }

    /// HTTP status code mapping for errors
    pub fn status_code(&self) -> u16 {
        match self {
            NocoError::InvalidOperation(_) => 422,
            NocoError::RemoteApi { status_code, .. } => *status_code,
            NocoError::Network(_) => 503,
            NocoError::Decode(_) => 502,
            NocoError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            NocoError::InvalidOperation(_) => "invalid_operation",
            NocoError::RemoteApi { .. } => "remote_api_error",
            NocoError::Network(_) => "network_error",
            NocoError::Decode(_) => "decode_error",
            NocoError::Config(_) => "configuration_error",
        }
    }

    /// Whether a transport may reasonably try the same request again.
    /// Local errors are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            NocoError::Network(_) => true,
            NocoError::RemoteApi { status_code, .. } => {
                *status_code == 429 || *status_code >= 500
            }
            _ => false,
        }
    }

    /// True for errors raised by this layer rather than by the remote side
    pub fn is_local(&self) -> bool {
        matches!(self, NocoError::InvalidOperation(_) | NocoError::Config(_))
    }
}

impl From<serde_json::Error> for NocoError {
    fn from(err: serde_json::Error) -> Self {
        NocoError::Decode(err.to_string())
    }
}
