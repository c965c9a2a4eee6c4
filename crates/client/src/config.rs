//! Configuration types for the FMP client.

use crate::error::{FmpError, FmpResult};
use std::time::Duration;
use url::Url;

/// Public FMP endpoint.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";

/// Default bound on a single upstream request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the FMP client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the FMP API; always ends with `/`.
    pub base_url: Url,
    /// API key appended to every request as `apikey`.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration against the public FMP endpoint.
    pub fn new(api_key: impl Into<String>) -> FmpResult<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a configuration against a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> FmpResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FmpError::Config("API key must not be empty".to_string()));
        }

        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            api_key,
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Parse a base URL and make sure relative joins append to its path.
pub fn normalize_base_url(raw: &str) -> FmpResult<Url> {
    let mut url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() {
        return Err(FmpError::Config(format!("Not a usable base URL: {}", raw)));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("demo-key").unwrap();

        assert_eq!(config.base_url.as_str(), "https://financialmodelingprep.com/");
        assert_eq!(config.api_key, "demo-key");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(ClientConfig::new("  "), Err(FmpError::Config(_))));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = normalize_base_url("http://localhost:9000/proxy").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/proxy/");

        let url = normalize_base_url("http://localhost:9000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(FmpError::InvalidUrl(_))
        ));
        assert!(normalize_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ClientConfig::new("super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
