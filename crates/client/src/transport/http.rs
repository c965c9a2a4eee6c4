//! HTTP transport for FMP requests.

use crate::config::ClientConfig;
use crate::error::{FmpError, FmpResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making FMP API requests.
///
/// Single attempt per call: timeouts, error statuses and malformed bodies
/// are returned to the caller immediately.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> FmpResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("fmp-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FmpError::Http)?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the configured base.
    fn build_url(&self, path: &str) -> FmpResult<url::Url> {
        Ok(self.config.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Execute an authenticated GET and parse the body as JSON.
    pub async fn get_json<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> FmpResult<Value> {
        let url = self.build_url(path)?;
        debug!(path = %url.path(), "FMP GET request");

        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("apikey", self.config.api_key.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            warn!(status = status, path = path, "FMP request failed");
            return Err(FmpError::from_response(status, &body));
        }

        let json: Value = serde_json::from_str(&body)?;

        if let Some(err) = FmpError::from_envelope(status, &json) {
            warn!(path = path, error = %err, "FMP returned an error envelope");
            return Err(err);
        }

        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::with_base_url("test-key", base_url).unwrap())
    }

    fn create_config_with_timeout(base_url: &str, timeout: Duration) -> Arc<ClientConfig> {
        let mut config = ClientConfig::with_base_url("test-key", base_url).unwrap();
        config.timeout = timeout;
        Arc::new(config)
    }

    #[tokio::test]
    async fn test_get_appends_api_key_and_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v4/insider-trading"))
            .and(query_param("symbol", "TSLA"))
            .and(query_param("limit", "5"))
            .and(query_param("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"symbol": "TSLA"}])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .get_json(
                "/api/v4/insider-trading",
                &[("symbol", "TSLA"), ("limit", "5")],
            )
            .await
            .unwrap();
        assert_eq!(result, json!([{"symbol": "TSLA"}]));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/earnings-surprises/AAPL"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"Error Message": "Invalid API KEY."})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .get_json("/api/v3/earnings-surprises/AAPL", &[] as &[(&str, &str)])
            .await;
        match result {
            Err(FmpError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API KEY.");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_envelope_with_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"Error Message": "Limit Reach . Please upgrade your plan"})),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .get_json("/api/v3/earning_calendar", &[] as &[(&str, &str)])
            .await;
        assert!(matches!(result, Err(FmpError::Api { status: 200, .. })));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(create_config(&server.uri())).unwrap();

        let result = transport
            .get_json("/api/v3/earning_calendar", &[] as &[(&str, &str)])
            .await;
        assert!(matches!(result, Err(FmpError::Json(_))));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = create_config_with_timeout(&server.uri(), Duration::from_millis(50));
        let transport = HttpTransport::new(config).unwrap();

        let result = transport
            .get_json("/api/v3/earning_calendar", &[] as &[(&str, &str)])
            .await;
        assert!(matches!(result, Err(FmpError::Timeout)));
    }

    #[tokio::test]
    async fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8080")).unwrap();

        let url = transport.build_url("/api/v3/earning_calendar").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v3/earning_calendar");
    }

    #[tokio::test]
    async fn test_build_url_keeps_base_path() {
        let transport = HttpTransport::new(create_config("http://localhost:8080/fmp")).unwrap();

        let url = transport.build_url("/api/v3/earning_calendar").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/fmp/api/v3/earning_calendar");
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let transport = HttpTransport::new(create_config("http://127.0.0.1:9")).unwrap();

        let err = transport
            .get_json("/api/v3/earnings-surprises/AAPL", &[("limit", "1")])
            .await
            .unwrap_err();

        assert!(matches!(err, FmpError::Http(_)));
        assert!(!err.to_string().contains("test-key"));
    }
}
