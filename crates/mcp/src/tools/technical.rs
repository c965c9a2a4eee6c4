// Technical indicator tools (get_rsi, get_sma)

use super::{to_output, upstream_error, utc_today, Clock};
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{
    json_schema_date, json_schema_integer, json_schema_object, json_schema_string, Tool,
};
use fmp_client::FmpClient;
use fmp_mcp_core::shaper::shape_indicator;
use fmp_mcp_core::validation::MAX_TIME_PERIOD;
use fmp_mcp_core::window::INDICATOR_LOOKBACK_DAYS;
use fmp_mcp_core::{DateWindow, IndicatorKind, IndicatorRequest};
use serde_json::Value;

/// One indicator series tool; the same type backs both RSI and SMA
pub struct IndicatorTool {
    client: FmpClient,
    kind: IndicatorKind,
    today: Clock,
}

impl IndicatorTool {
    pub fn new(client: FmpClient, kind: IndicatorKind) -> Self {
        Self {
            client,
            kind,
            today: utc_today,
        }
    }

    pub fn rsi(client: FmpClient) -> Self {
        Self::new(client, IndicatorKind::Rsi)
    }

    pub fn sma(client: FmpClient) -> Self {
        Self::new(client, IndicatorKind::Sma)
    }

    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }

    fn description(&self) -> String {
        let usage = match self.kind {
            IndicatorKind::Rsi => "Useful for momentum and mean-reversion signals.",
            IndicatorKind::Sma => "Useful for trend-following and crossover signals.",
        };
        format!(
            "Get {} values for a symbol on daily candles. Returns date/value pairs between \
             from_date (default: {} days before to_date) and to_date (default: today). {}",
            self.kind.display_name(),
            INDICATOR_LOOKBACK_DAYS,
            usage
        )
    }
}

#[async_trait::async_trait]
impl Tool for IndicatorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.kind.tool_name().to_string(),
            description: self.description(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("The stock symbol"),
                    "time_period": json_schema_integer(
                        "Number of periods used in the calculation",
                        1,
                        MAX_TIME_PERIOD,
                        u64::from(self.kind.default_period()),
                    ),
                    "from_date": json_schema_date("Start date in YYYY-MM-DD format"),
                    "to_date": json_schema_date("End date in YYYY-MM-DD format")
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let req = IndicatorRequest::from_arguments(self.kind, &arguments)?;
        let window = DateWindow::lookback(
            req.from_date,
            req.to_date,
            (self.today)(),
            INDICATOR_LOOKBACK_DAYS,
        );

        let raw = self
            .client
            .technical()
            .indicator(&req.symbol, req.kind, req.time_period)
            .await
            .map_err(|e| {
                let what = format!("{} data", req.kind.as_str().to_uppercase());
                upstream_error(req.kind.tool_name(), &what, e)
            })?;

        let output = shape_indicator(&req.symbol, req.kind, req.time_period, &raw, &window);
        tracing::debug!(
            symbol = %req.symbol,
            indicator = %req.kind,
            values = output.values.len(),
            "Indicator series shaped"
        );
        to_output(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::client;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_schema_names_and_defaults() {
        let server_uri = "http://127.0.0.1:9";
        let client = FmpClient::builder()
            .api_key("k")
            .base_url(server_uri)
            .build()
            .unwrap();

        let rsi = IndicatorTool::rsi(client.clone()).schema();
        assert_eq!(rsi.name, "get_rsi");
        assert_eq!(rsi.input_schema["properties"]["time_period"]["default"], 14);
        assert_eq!(rsi.input_schema["properties"]["time_period"]["maximum"], 1000);
        assert_eq!(rsi.input_schema["required"], json!(["symbol"]));

        let sma = IndicatorTool::sma(client).schema();
        assert_eq!(sma.name, "get_sma");
        assert_eq!(sma.input_schema["properties"]["time_period"]["default"], 20);
    }

    #[tokio::test]
    async fn test_rsi_default_period_and_window() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/technical_indicator/daily/AAPL"))
            .and(query_param("type", "rsi"))
            .and(query_param("period", "14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2024-06-28 00:00:00", "close": 210.6, "rsi": 61.2},
                {"date": "2024-06-27 00:00:00", "close": 214.1, "rsi": 66.9},
                {"date": "2024-01-02 00:00:00", "close": 185.6, "rsi": 35.0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tool = IndicatorTool::rsi(client(&server)).with_clock(fixed_today);
        let output = tool.execute(json!({"symbol": "AAPL"})).await.unwrap();

        assert_eq!(output["symbol"], "AAPL");
        assert_eq!(output["indicator"], "rsi");
        assert_eq!(output["time_period"], 14);
        let values = output["values"].as_array().unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["value"], 61.2);
    }

    #[tokio::test]
    async fn test_sma_custom_period_and_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/technical_indicator/daily/MSFT"))
            .and(query_param("type", "sma"))
            .and(query_param("period", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2024-03-01 00:00:00", "sma": 410.0},
                {"date": "2024-02-15 00:00:00", "sma": 405.5},
                {"date": "2024-01-31 00:00:00", "sma": 398.2}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let tool = IndicatorTool::sma(client(&server)).with_clock(fixed_today);
        let output = tool
            .execute(json!({
                "symbol": "MSFT",
                "time_period": 50,
                "from_date": "2024-02-01",
                "to_date": "2024-02-29"
            }))
            .await
            .unwrap();

        assert_eq!(output["time_period"], 50);
        assert_eq!(output["values"], json!([{"date": "2024-02-15 00:00:00", "value": 405.5}]));
    }

    #[tokio::test]
    async fn test_period_out_of_range_skips_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let tool = IndicatorTool::rsi(client(&server));
        let err = tool
            .execute(json!({"symbol": "AAPL", "time_period": 0}))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_upstream_error_names_indicator() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "Error Message": "Invalid API KEY."
            })))
            .mount(&server)
            .await;

        let tool = IndicatorTool::sma(client(&server));
        let err = tool.execute(json!({"symbol": "AAPL"})).await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Error fetching SMA data"));
        assert!(message.contains("Invalid API KEY."));
    }
}
