//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_API_URL` - Base URL of the hosted collection store's REST
//!   endpoint (e.g., `https://xyzcompany.example.co/rest/v1/`)
//! - `CATALOG_API_KEY` - API key for the store
//!
//! ## Optional
//! - `CATALOG_CACHE_TTL_SECS` - Read-cache TTL in seconds (default: 300)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level catalog configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Hosted collection store settings.
    pub store: StoreConfig,
}

/// Connection settings for the hosted collection store.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store's REST endpoint.
    pub api_url: Url,
    /// API key (sent as both `apikey` and bearer token).
    pub api_key: SecretString,
    /// TTL for cached read queries.
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"[REDACTED]")
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl CatalogConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            store: StoreConfig::from_env()?,
        })
    }
}

impl StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = get_required_env("CATALOG_API_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;

        let api_key = SecretString::from(get_required_env("CATALOG_API_KEY")?);

        let cache_ttl_secs = get_env_or_default("CATALOG_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            api_key,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default fallback.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StoreConfig {
            api_url: "https://store.example.com/rest/v1/".parse().expect("url"),
            api_key: SecretString::from("super-secret-key".to_string()),
            cache_ttl: Duration::from_secs(300),
        };

        let rendered = format!("{config:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret-key"));
    }
}
