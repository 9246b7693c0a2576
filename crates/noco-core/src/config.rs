//! Client configuration
//!
//! Connection settings are always handed to the transport explicitly.
//! `from_env` is a convenience for binaries; library code never calls it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://app.nocodb.com";

/// How the API token is attached to outgoing requests
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `xc-token: <token>`
    #[default]
    XcToken,
    /// `Authorization: Bearer <token>`
    Bearer,
}

impl AuthScheme {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "xc_token" | "xc-token" | "token" => Some(Self::XcToken),
            "bearer" => Some(Self::Bearer),
            _ => None,
        }
    }

    /// Header name and value for the given token
    pub fn header(&self, token: &str) -> (&'static str, String) {
        match self {
            Self::XcToken => ("xc-token", token.to_string()),
            Self::Bearer => ("Authorization", format!("Bearer {}", token)),
        }
    }
}

/// Settings for a NocoDB deployment
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Base URL of the deployment, without the `/api/...` suffix
    pub api_url: String,
    pub api_token: String,
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    /// Project (base) id, e.g. `p_xxxx`
    pub project: Option<String>,
    pub workspace: Option<String>,
    /// Total attempts per request, including the first
    pub retry_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: String::new(),
            auth_scheme: AuthScheme::XcToken,
            project: None,
            workspace: None,
            retry_attempts: 3,
            retry_delay_ms: 100,
            timeout_secs: 30,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not set: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ClientConfig {
    /// Create config with a specific URL and token
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_retry(mut self, attempts: u32, delay_ms: u64) -> Self {
        self.retry_attempts = attempts;
        self.retry_delay_ms = delay_ms;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    /// Unset keys keep their defaults; `NOCODB_API_TOKEN` is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("NOCODB_API_URL") {
            config.api_url = url;
        }

        config.api_token = lookup("NOCODB_API_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("NOCODB_API_TOKEN".to_string()))?;

        if let Some(scheme) = lookup("NOCODB_AUTH_SCHEME") {
            config.auth_scheme =
                AuthScheme::from_str(&scheme).ok_or_else(|| ConfigError::InvalidValue {
                    key: "NOCODB_AUTH_SCHEME".to_string(),
                    message: format!("unknown scheme '{}'", scheme),
                })?;
        }

        config.project = lookup("NOCODB_PROJECT");
        config.workspace = lookup("NOCODB_WORKSPACE");

        if let Some(v) = lookup("NOCODB_RETRY_ATTEMPTS") {
            config.retry_attempts = parse_number("NOCODB_RETRY_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("NOCODB_RETRY_DELAY_MS") {
            config.retry_delay_ms = parse_number("NOCODB_RETRY_DELAY_MS", &v)?;
        }
        if let Some(v) = lookup("NOCODB_TIMEOUT_SECS") {
            config.timeout_secs = parse_number("NOCODB_TIMEOUT_SECS", &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        let parsed = url::Url::parse(&self.api_url).map_err(|e| ConfigError::InvalidValue {
            key: "api_url".to_string(),
            message: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                key: "api_url".to_string(),
                message: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{}' is not a number", value),
    })
}
