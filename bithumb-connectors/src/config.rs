//! Client configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::fmt;

use crate::error::{BithumbError, BithumbResult};

// =============================================================================
// Constants
// =============================================================================

/// Bithumb REST API base URL
pub const BITHUMB_API_URL: &str = "https://api.bithumb.com";

const ENV_API_URL: &str = "BITHUMB_API_URL";
const ENV_CONNECT_KEY: &str = "BITHUMB_CONNECT_KEY";
const ENV_SECRET_KEY: &str = "BITHUMB_SECRET_KEY";

// =============================================================================
// Configuration
// =============================================================================

/// Client configuration.
#[derive(Clone)]
pub struct BithumbConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Connect key for private endpoints
    pub connect_key: Option<String>,
    /// Secret key for private endpoints
    pub secret_key: Option<String>,
}

impl BithumbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> BithumbResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> BithumbResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup(ENV_API_URL) {
            Some(url) if !url.trim().is_empty() => normalize_base_url(&url)?,
            _ => BITHUMB_API_URL.to_string(),
        };

        Ok(Self {
            base_url,
            connect_key: non_empty(lookup(ENV_CONNECT_KEY)),
            secret_key: non_empty(lookup(ENV_SECRET_KEY)),
        })
    }

    /// Point the client at another host (stub servers, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> BithumbResult<Self> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    /// Attach a key pair.
    pub fn with_credentials(
        mut self,
        connect_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.connect_key = non_empty(Some(connect_key.into()));
        self.secret_key = non_empty(Some(secret_key.into()));
        self
    }

    /// Both keys are present.
    pub fn has_credentials(&self) -> bool {
        self.connect_key.is_some() && self.secret_key.is_some()
    }
}

impl Default for BithumbConfig {
    fn default() -> Self {
        Self {
            base_url: BITHUMB_API_URL.to_string(),
            connect_key: None,
            secret_key: None,
        }
    }
}

impl fmt::Debug for BithumbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BithumbConfig")
            .field("base_url", &self.base_url)
            .field("connect_key", &self.connect_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn normalize_base_url(url: &str) -> BithumbResult<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(BithumbError::Config(format!(
            "Invalid {}: {}. Expected an http:// or https:// URL",
            ENV_API_URL, url
        )));
    }
    Ok(url.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BithumbConfig::default();

        assert_eq!(config.base_url, "https://api.bithumb.com");
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_lookup_without_variables() {
        let config = BithumbConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.base_url, BITHUMB_API_URL);
        assert!(config.connect_key.is_none());
    }

    #[test]
    fn test_lookup_reads_all_variables() {
        let config = BithumbConfig::from_lookup(lookup_from(&[
            ("BITHUMB_API_URL", "http://127.0.0.1:9000/"),
            ("BITHUMB_CONNECT_KEY", "connect"),
            ("BITHUMB_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.has_credentials());
    }

    #[test]
    fn test_empty_keys_are_absent() {
        let config = BithumbConfig::from_lookup(lookup_from(&[
            ("BITHUMB_CONNECT_KEY", ""),
            ("BITHUMB_SECRET_KEY", "secret"),
        ]))
        .unwrap();

        assert!(config.connect_key.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = BithumbConfig::from_lookup(lookup_from(&[("BITHUMB_API_URL", "api.bithumb.com")]));

        assert!(matches!(result, Err(BithumbError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = BithumbConfig::default().with_credentials("connect", "hunter2");

        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
