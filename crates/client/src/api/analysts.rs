//! Analyst price target endpoints.

use crate::client::FmpClient;
use crate::error::FmpResult;
use fmp_mcp_core::Symbol;
use serde_json::Value;

/// Price target consensus and individual analyst targets.
pub struct AnalystsApi<'a> {
    client: &'a FmpClient,
}

impl<'a> AnalystsApi<'a> {
    pub(crate) fn new(client: &'a FmpClient) -> Self {
        Self { client }
    }

    /// High / low / median / consensus target for a symbol.
    pub async fn price_target_consensus(&self, symbol: &Symbol) -> FmpResult<Value> {
        self.client
            .http
            .get_json("/api/v4/price-target-consensus", &[("symbol", symbol.as_str())])
            .await
    }

    /// Individual analyst price targets for a symbol.
    pub async fn price_targets(&self, symbol: &Symbol) -> FmpResult<Value> {
        self.client
            .http
            .get_json("/api/v4/price-target", &[("symbol", symbol.as_str())])
            .await
    }
}
