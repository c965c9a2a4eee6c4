// Earnings tools: EPS surprises and the earnings calendar

use super::{to_output, upstream_error, utc_today, Clock};
use crate::error::ToolError;
use crate::protocol::ToolSchema;
use crate::tools::{json_schema_date, json_schema_object, json_schema_string, Tool};
use fmp_client::FmpClient;
use fmp_mcp_core::shaper::{shape_earnings_calendar, shape_eps_surprises};
use fmp_mcp_core::window::CALENDAR_LOOKAHEAD_DAYS;
use fmp_mcp_core::{DateWindow, EarningsCalendarRequest, SymbolRequest};
use serde_json::Value;

/// Actual vs. estimated EPS history for a symbol
pub struct EpsSurpriseTool {
    client: FmpClient,
}

impl EpsSurpriseTool {
    pub const NAME: &'static str = "get_eps_surprise";

    pub fn new(client: FmpClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for EpsSurpriseTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get earnings surprise data for a symbol. Returns actual EPS, estimated \
                          EPS and the surprise (absolute and percentage) for each reported \
                          quarter. Critical for post-earnings announcement drift (PEAD) strategies."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("The stock symbol to fetch earnings surprise data for")
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let req = SymbolRequest::from_arguments(&arguments)?;

        let raw = self
            .client
            .earnings()
            .surprises(&req.symbol)
            .await
            .map_err(|e| upstream_error(Self::NAME, "EPS surprise data", e))?;

        let reports = shape_eps_surprises(&raw);
        tracing::debug!(symbol = %req.symbol, records = reports.len(), "EPS surprises shaped");
        to_output(&reports)
    }
}

/// Upcoming (or historical) earnings announcements in a date window
pub struct EarningsCalendarTool {
    client: FmpClient,
    today: Clock,
}

impl EarningsCalendarTool {
    pub const NAME: &'static str = "get_earnings_calendar";

    pub fn new(client: FmpClient) -> Self {
        Self {
            client,
            today: utc_today,
        }
    }

    pub fn with_clock(mut self, today: Clock) -> Self {
        self.today = today;
        self
    }
}

#[async_trait::async_trait]
impl Tool for EarningsCalendarTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: format!(
                "Get earnings calendar events. Returns earnings announcements between from_date \
                 (default: today) and to_date (default: today + {} days). Optionally filter by \
                 symbol. Useful for PEAD strategies and volatility forecasting.",
                CALENDAR_LOOKAHEAD_DAYS
            ),
            input_schema: json_schema_object(
                serde_json::json!({
                    "from_date": json_schema_date("Start date in YYYY-MM-DD format"),
                    "to_date": json_schema_date("End date in YYYY-MM-DD format"),
                    "symbol": json_schema_string("Filter by specific symbol")
                }),
                vec![],
            ),
        }
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let req = EarningsCalendarRequest::from_arguments(&arguments)?;
        let window = DateWindow::lookahead(
            req.from_date,
            req.to_date,
            (self.today)(),
            CALENDAR_LOOKAHEAD_DAYS,
        );

        let earnings = self.client.earnings();
        let raw = match &req.symbol {
            Some(symbol) => earnings.symbol_calendar(symbol).await,
            None => {
                earnings
                    .calendar(&window.from_param(), &window.to_param())
                    .await
            }
        }
        .map_err(|e| upstream_error(Self::NAME, "earnings calendar data", e))?;

        let events = shape_earnings_calendar(&raw, &window);
        tracing::debug!(
            from = %window.from,
            to = %window.to,
            events = events.len(),
            "Earnings calendar shaped"
        );
        to_output(&events)
    }
}
