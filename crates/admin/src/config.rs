//! Connection settings for the management API.
//!
//! Read once at startup; the client never looks at the environment again.

use thiserror::Error;

/// Base URL of the management API (without the `/management/...` suffix).
pub const API_ENDPOINT_VAR: &str = "CATALOG_API_ENDPOINT";
/// Bearer token sent with every request.
pub const API_KEY_VAR: &str = "CATALOG_API_KEY";

const PRODUCT_API_PATH: &str = "/management/product";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("invalid value for '{key}': {details}")]
    Invalid { key: String, details: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    base_url: String,
    token: String,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        let token = token.into().trim().to_string();

        reqwest::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            key: API_ENDPOINT_VAR.to_string(),
            details: e.to_string(),
        })?;
        if token.is_empty() {
            return Err(ConfigError::Invalid {
                key: API_KEY_VAR.to_string(),
                details: "token is empty".to_string(),
            });
        }

        Ok(Self { base_url, token })
    }

    /// Load from `CATALOG_API_ENDPOINT` and `CATALOG_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_ENDPOINT_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_ENDPOINT_VAR.to_string()))?;
        let token = lookup(API_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))?;
        Self::new(base_url, token)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `{base_url}/management/product`
    pub fn product_api_base(&self) -> String {
        format!("{}{}", self.base_url, PRODUCT_API_PATH)
    }
}

impl core::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
