// Analyst price target tool

use super::{to_output, upstream_error};
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use fmp_client::FmpClient;
use fmp_mcp_core::shaper::shape_price_targets;
use fmp_mcp_core::SymbolRequest;
use serde_json::Value;

/// Consensus price target plus, when available, the individual analyst targets.
///
/// The consensus request must succeed. The per-analyst list is fetched
/// alongside it and dropped with a warning if it fails.
pub struct PriceTargetsTool {
    client: FmpClient,
}

impl PriceTargetsTool {
    pub const NAME: &'static str = "get_price_targets";

    pub fn new(client: FmpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for PriceTargetsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get analyst price targets for a symbol. Returns the consensus, high, \
                          low and median targets along with individual analyst ratings when \
                          available. Useful for sentiment analysis and valuation context."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("The stock symbol to fetch price targets for")
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let req = SymbolRequest::from_arguments(&arguments)?;
        let analysts = self.client.analysts();

        let (consensus, ratings) = tokio::join!(
            analysts.price_target_consensus(&req.symbol),
            analysts.price_targets(&req.symbol)
        );

        let consensus =
            consensus.map_err(|e| upstream_error(Self::NAME, "price target data", e))?;

        let ratings = match ratings {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(symbol = %req.symbol, error = %e, "Analyst ratings unavailable");
                None
            }
        };

        let shaped = shape_price_targets(&req.symbol, &consensus, ratings.as_ref());
        to_output(&shaped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_consensus(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v4/price-target-consensus"))
            .and(query_param("symbol", "NVDA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "symbol": "NVDA",
                "targetHigh": 200.0,
                "targetLow": 90.0,
                "targetConsensus": 140.25,
                "targetMedian": 145.0
            }])))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_consensus_with_ratings() {
        let server = MockServer::start().await;
        mount_consensus(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/price-target"))
            .and(query_param("symbol", "NVDA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"symbol": "NVDA", "publishedDate": "2024-06-01T09:00:00.000Z", "analystName": "A. Analyst", "analystCompany": "Acme", "priceTarget": 160.0},
                {"symbol": "NVDA", "publishedDate": "2024-05-20T09:00:00.000Z", "analystCompany": "Globex", "priceTarget": 150.0}
            ])))
            .mount(&server)
            .await;

        let tool = PriceTargetsTool::new(client(&server));
        let output = tool.execute(json!({"symbol": "NVDA"})).await.unwrap();

        assert_eq!(output["symbol"], "NVDA");
        assert_eq!(output["target_consensus"], 140.25);
        assert_eq!(output["target_median"], 145.0);
        assert_eq!(output["ratings"].as_array().unwrap().len(), 2);
        assert_eq!(output["ratings"][0]["analyst_company"], "Acme");
    }

    #[tokio::test]
    async fn test_ratings_failure_is_not_fatal() {
        let server = MockServer::start().await;
        mount_consensus(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/v4/price-target"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "Error Message": "Exclusive Endpoint"
            })))
            .mount(&server)
            .await;

        let tool = PriceTargetsTool::new(client(&server));
        let output = tool.execute(json!({"symbol": "NVDA"})).await.unwrap();

        assert_eq!(output["target_high"], 200.0);
        assert!(output["ratings"].is_null());
    }

    #[tokio::test]
    async fn test_consensus_failure_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let tool = PriceTargetsTool::new(client(&server));
        let err = tool.execute(json!({"symbol": "NVDA"})).await.unwrap_err();
        assert!(err.to_string().starts_with("Error fetching price target data"));
    }
}
