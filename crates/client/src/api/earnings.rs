//! Earnings endpoints.

use crate::client::FmpClient;
use crate::error::FmpResult;
use fmp_mcp_core::Symbol;
use serde_json::Value;

/// Earnings surprises and earnings calendar.
pub struct EarningsApi<'a> {
    client: &'a FmpClient,
}

impl<'a> EarningsApi<'a> {
    pub(crate) fn new(client: &'a FmpClient) -> Self {
        Self { client }
    }

    /// Historical actual vs. estimated EPS for a symbol.
    pub async fn surprises(&self, symbol: &Symbol) -> FmpResult<Value> {
        self.client
            .http
            .get_json(&format!("/api/v3/earnings-surprises/{}", symbol), &[] as &[(&str, &str)])
            .await
    }

    /// Market-wide earnings calendar between two `YYYY-MM-DD` dates.
    pub async fn calendar(&self, from: &str, to: &str) -> FmpResult<Value> {
        self.client
            .http
            .get_json("/api/v3/earning_calendar", &[("from", from), ("to", to)])
            .await
    }

    /// Past and scheduled earnings dates for one symbol.
    pub async fn symbol_calendar(&self, symbol: &Symbol) -> FmpResult<Value> {
        self.client
            .http
            .get_json(
                &format!("/api/v3/historical/earning_calendar/{}", symbol),
                &[] as &[(&str, &str)],
            )
            .await
    }
}
