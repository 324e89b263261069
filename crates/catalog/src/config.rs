//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `CATALOG_DATA_DIR` - Directory holding the stored catalog and session (default: .catalog-keeper)
//! - `CATALOG_AUTH_URL` - Login endpoint (default: <https://reqres.in/api/login>)
//! - `CATALOG_AUTH_API_KEY` - Value for the `x-api-key` header on login requests
//! - `CATALOG_STORE_ATTEMPTS` - Attempts per backing-store call (default: 1)
//! - `CATALOG_STORE_BACKOFF_MS` - Wait before the first retry, doubled after (default: 50)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::store::RetryPolicy;

const DEFAULT_DATA_DIR: &str = ".catalog-keeper";
const DEFAULT_AUTH_URL: &str = "https://reqres.in/api/login";
const DEFAULT_STORE_ATTEMPTS: &str = "1";
const DEFAULT_STORE_BACKOFF_MS: &str = "50";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog application configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Login endpoint configuration
    pub auth: AuthConfig,
    /// Retry policy for backing-store calls
    pub retry: RetryPolicy,
}

/// Login endpoint configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AuthConfig {
    /// URL the credentials are posted to
    pub login_url: Url,
    /// Sent as `x-api-key` when set
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("login_url", &self.login_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl AuthConfig {
    /// Config for a login endpoint with no API key.
    #[must_use]
    pub const fn new(login_url: Url) -> Self {
        Self {
            login_url,
            api_key: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "CATALOG_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));

        let login_url = get_env_or_default(&lookup, "CATALOG_AUTH_URL", DEFAULT_AUTH_URL)
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_AUTH_URL".to_string(), e.to_string()))?;
        let api_key = get_optional_env(&lookup, "CATALOG_AUTH_API_KEY").map(SecretString::from);

        let attempts = get_env_or_default(&lookup, "CATALOG_STORE_ATTEMPTS", DEFAULT_STORE_ATTEMPTS)
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_STORE_ATTEMPTS".to_string(), e.to_string())
            })?;
        if attempts == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_STORE_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let backoff_ms =
            get_env_or_default(&lookup, "CATALOG_STORE_BACKOFF_MS", DEFAULT_STORE_BACKOFF_MS)
                .parse::<u64>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("CATALOG_STORE_BACKOFF_MS".to_string(), e.to_string())
                })?;

        Ok(Self {
            data_dir,
            auth: AuthConfig { login_url, api_key },
            retry: RetryPolicy::new(attempts, Duration::from_millis(backoff_ms)),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Empty values count as unset.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}
