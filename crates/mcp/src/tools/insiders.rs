// Insider trading tool

use super::{to_output, upstream_error};
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_integer, json_schema_object, json_schema_string, Tool};
use fmp_client::FmpClient;
use fmp_mcp_core::shaper::shape_insider_trading;
use fmp_mcp_core::validation::MAX_LIMIT;
use fmp_mcp_core::InsiderTradingRequest;
use serde_json::Value;

pub struct InsiderTradingTool {
    client: FmpClient,
}

impl InsiderTradingTool {
    pub const NAME: &'static str = "get_insider_trading";

    pub fn new(client: FmpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for InsiderTradingTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get insider trading activity for a symbol. Returns filings with the \
                          reporting insider, their title, transaction type, share count and \
                          price. Useful for sentiment and conviction signals."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("The stock symbol to fetch insider trades for"),
                    "page": json_schema_integer(
                        "Result page, starting at 0",
                        0,
                        u64::from(u32::MAX),
                        0,
                    ),
                    "limit": json_schema_integer(
                        "Maximum number of transactions to return",
                        1,
                        MAX_LIMIT,
                        u64::from(InsiderTradingRequest::DEFAULT_LIMIT),
                    )
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let req = InsiderTradingRequest::from_arguments(&arguments)?;

        let raw = self
            .client
            .insiders()
            .trading(&req.symbol, req.page, req.limit)
            .await
            .map_err(|e| upstream_error(Self::NAME, "insider trading data", e))?;

        let activity = shape_insider_trading(&req.symbol, &raw);
        tracing::debug!(
            symbol = %req.symbol,
            page = req.page,
            records = activity.len(),
            "Insider trades shaped"
        );
        to_output(&activity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::client;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_default_paging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v4/insider-trading"))
            .and(query_param("symbol", "TSLA"))
            .and(query_param("page", "0"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "symbol": "TSLA",
                "filingDate": "2024-05-10 20:01:00",
                "transactionDate": "2024-05-08",
                "reportingName": "Doe Jane",
                "typeOfOwner": "director",
                "transactionType": "S-Sale",
                "securitiesTransacted": 1500,
                "price": 172.5,
                "link": "https://www.sec.gov/Archives/example.htm"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let tool = InsiderTradingTool::new(client(&server));
        let output = tool.execute(json!({"symbol": "TSLA"})).await.unwrap();

        let trades = output.as_array().unwrap();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0]["reporter_name"], "Doe Jane");
        assert_eq!(trades[0]["reporter_title"], "director");
        assert_eq!(trades[0]["shares"], 1500.0);
        assert_eq!(trades[0]["url"], "https://www.sec.gov/Archives/example.htm");
    }

    #[tokio::test]
    async fn test_explicit_paging() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v4/insider-trading"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let tool = InsiderTradingTool::new(client(&server));
        let output = tool
            .execute(json!({"symbol": "TSLA", "page": 2, "limit": 10}))
            .await
            .unwrap();
        assert_eq!(output, json!([]));
    }

    #[tokio::test]
    async fn test_limit_out_of_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let tool = InsiderTradingTool::new(client(&server));
        let err = tool
            .execute(json!({"symbol": "TSLA", "limit": 5000}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
