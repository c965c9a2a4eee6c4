// FMP-backed MCP tools

pub mod analysts;
pub mod earnings;
pub mod insiders;
pub mod technical;
mod registry;

pub use analysts::PriceTargetsTool;
pub use earnings::{EarningsCalendarTool, EpsSurpriseTool};
pub use insiders::InsiderTradingTool;
pub use registry::{
    json_schema_date, json_schema_integer, json_schema_object, json_schema_string, Tool,
    ToolRegistry,
};
pub use technical::IndicatorTool;

use crate::error::ToolError;
use chrono::NaiveDate;
use fmp_client::{FmpClient, FmpError};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Source of "today" for default date windows
pub type Clock = fn() -> NaiveDate;

pub fn utc_today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Names of every tool `register_fmp_tools` installs
pub const FMP_TOOL_NAMES: [&str; 6] = [
    "get_earnings_calendar",
    "get_eps_surprise",
    "get_insider_trading",
    "get_price_targets",
    "get_rsi",
    "get_sma",
];

/// Register the six FMP tools, all sharing one client
pub fn register_fmp_tools(registry: &mut ToolRegistry, client: FmpClient) {
    registry.register(Arc::new(EpsSurpriseTool::new(client.clone())));
    registry.register(Arc::new(IndicatorTool::rsi(client.clone())));
    registry.register(Arc::new(IndicatorTool::sma(client.clone())));
    registry.register(Arc::new(PriceTargetsTool::new(client.clone())));
    registry.register(Arc::new(InsiderTradingTool::new(client.clone())));
    registry.register(Arc::new(EarningsCalendarTool::new(client)));
}

/// Registry holding exactly the FMP tools
pub fn fmp_registry(client: FmpClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_fmp_tools(&mut registry, client);
    registry
}

fn to_output<T: Serialize>(shaped: &T) -> Result<Value, ToolError> {
    serde_json::to_value(shaped).map_err(|e| ToolError::Internal(e.to_string()))
}

fn upstream_error(tool: &str, what: &str, err: FmpError) -> ToolError {
    tracing::error!(tool = tool, error = %err, "Upstream request failed");
    ToolError::upstream(what, err)
}

#[cfg(test)]
pub(crate) mod test_support {
    use fmp_client::FmpClient;
    use wiremock::MockServer;

    pub fn client(server: &MockServer) -> FmpClient {
        FmpClient::builder()
            .api_key("test-key")
            .base_url(server.uri())
            .build()
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fmp_registry_has_all_tools() {
        let server = MockServer::start().await;
        let registry = fmp_registry(test_support::client(&server));

        assert_eq!(registry.len(), FMP_TOOL_NAMES.len());
        assert_eq!(registry.names(), FMP_TOOL_NAMES.map(String::from).to_vec());

        for schema in registry.list_schemas() {
            assert!(!schema.description.is_empty());
            assert_eq!(schema.input_schema["type"], "object");
        }
    }

    #[tokio::test]
    async fn test_bad_symbol_never_reaches_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let registry = fmp_registry(test_support::client(&server));
        let needs_symbol: Vec<String> = registry
            .list_schemas()
            .into_iter()
            .filter(|schema| {
                schema.input_schema["required"]
                    .as_array()
                    .is_some_and(|required| required.iter().any(|r| r == "symbol"))
            })
            .map(|schema| schema.name)
            .collect();
        assert_eq!(needs_symbol.len(), 5);

        for name in &needs_symbol {
            for args in [
                json!({}),
                json!({"symbol": 42}),
                json!({"symbol": "  "}),
                json!({"symbol": ".."}),
            ] {
                let err = registry.call(name, args.clone()).await.unwrap_err();
                assert!(
                    matches!(err, ToolError::InvalidArguments(_)),
                    "{name} with {args}: {err:?}"
                );
            }
        }
    }
}
