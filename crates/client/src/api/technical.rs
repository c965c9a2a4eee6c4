//! Technical indicator endpoints.

use crate::client::FmpClient;
use crate::error::FmpResult;
use fmp_mcp_core::{IndicatorKind, Symbol};
use serde_json::Value;

/// Candle timeframe used for indicator series.
pub const DAILY: &str = "daily";

/// Server-side computed indicators.
pub struct TechnicalApi<'a> {
    client: &'a FmpClient,
}

impl<'a> TechnicalApi<'a> {
    pub(crate) fn new(client: &'a FmpClient) -> Self {
        Self { client }
    }

    /// Daily indicator series for a symbol, newest first.
    pub async fn indicator(
        &self,
        symbol: &Symbol,
        kind: IndicatorKind,
        period: u32,
    ) -> FmpResult<Value> {
        let period = period.to_string();
        self.client
            .http
            .get_json(
                &format!("/api/v3/technical_indicator/{}/{}", DAILY, symbol),
                &[("type", kind.as_str()), ("period", period.as_str())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::FmpClient;
    use fmp_mcp_core::{IndicatorKind, Symbol};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_indicator_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/technical_indicator/daily/NVDA"))
            .and(query_param("type", "rsi"))
            .and(query_param("period", "14"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"date": "2024-01-02 00:00:00", "rsi": 55.0}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = FmpClient::builder()
            .api_key("test-key")
            .base_url(server.uri())
            .build()
            .unwrap();

        let result = client
            .technical()
            .indicator(&Symbol("NVDA".to_string()), IndicatorKind::Rsi, 14)
            .await
            .unwrap();
        assert_eq!(result[0]["rsi"], 55.0);
    }
}
