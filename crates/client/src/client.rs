//! Main client for the FMP API.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{FmpError, FmpResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;

/// Client for the subset of FMP endpoints backing the MCP tools.
#[derive(Debug, Clone)]
pub struct FmpClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl FmpClient {
    /// Create a new client builder.
    pub fn builder() -> FmpClientBuilder {
        FmpClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> FmpResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Get the earnings API.
    pub fn earnings(&self) -> EarningsApi<'_> {
        EarningsApi::new(self)
    }

    /// Get the technical indicator API.
    pub fn technical(&self) -> TechnicalApi<'_> {
        TechnicalApi::new(self)
    }

    /// Get the analyst price target API.
    pub fn analysts(&self) -> AnalystsApi<'_> {
        AnalystsApi::new(self)
    }

    /// Get the insider trading API.
    pub fn insiders(&self) -> InsidersApi<'_> {
        InsidersApi::new(self)
    }
}

/// Builder for creating an FmpClient.
pub struct FmpClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl FmpClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the FMP base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the FMP API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> FmpResult<FmpClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| FmpError::Config("api_key is required".to_string()))?;

        if self.timeout.is_zero() {
            return Err(FmpError::Config("timeout must be greater than zero".to_string()));
        }

        let mut config = ClientConfig::with_base_url(api_key, &self.base_url)?;
        config.timeout = self.timeout;

        FmpClient::from_config(config)
    }
}

impl Default for FmpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
