//! # Client Configuration
//!
//! Connection settings for the backend API.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Explicit values passed by the embedding shell
//! 2. Environment variables (`THEENI_*`)
//! 3. Defaults (this file)
//!
//! The defaults point at a local development backend, matching how the
//! register is run against a backend on the same machine.

use std::time::Duration;

use url::Url;

use crate::error::ClientResult;

/// Default backend location for development setups.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`ApiClient`](crate::http::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (scheme, host, port). Endpoint paths are
    /// joined onto this.
    pub base_url: Url,

    /// Per-request timeout. No request outlives this, including order
    /// submission.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL with the default
    /// timeout.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Ok(ClientConfig {
            base_url: Url::parse(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Creates a config from environment variables or provided values.
    ///
    /// ## Environment Variables
    /// - `THEENI_API_URL`: backend base URL
    /// - `THEENI_TIMEOUT_SECS`: per-request timeout in seconds
    pub fn from_env_or(base_url: Option<String>, timeout_secs: Option<u64>) -> ClientResult<Self> {
        let base_url = base_url
            .or_else(|| std::env::var("THEENI_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = timeout_secs
            .or_else(|| {
                std::env::var("THEENI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
            })
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(ClientConfig {
            base_url: Url::parse(&base_url)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Joins an absolute endpoint path (e.g. `/api/v1/items`) onto the
    /// base URL.
    pub fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_win() {
        let config =
            ClientConfig::from_env_or(Some("http://backend.lan:9000".to_string()), Some(5))
                .unwrap();
        assert_eq!(config.base_url.as_str(), "http://backend.lan:9000/");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_url() {
        let config = ClientConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(config.base_url.port(), Some(8000));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_endpoint_joining() {
        let config = ClientConfig::new("http://127.0.0.1:8000").unwrap();
        let url = config.endpoint("/api/v1/items").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/items");

        let token = config.endpoint("/token").unwrap();
        assert_eq!(token.as_str(), "http://127.0.0.1:8000/token");
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(ClientConfig::new("not a url").is_err());
    }
}
