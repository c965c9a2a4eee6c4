//! Insider trading endpoints.

use crate::client::FmpClient;
use crate::error::FmpResult;
use fmp_mcp_core::Symbol;
use serde_json::Value;

/// SEC Form 4 insider transactions.
pub struct InsidersApi<'a> {
    client: &'a FmpClient,
}

impl<'a> InsidersApi<'a> {
    pub(crate) fn new(client: &'a FmpClient) -> Self {
        Self { client }
    }

    /// One page of insider transactions for a symbol, newest first.
    pub async fn trading(&self, symbol: &Symbol, page: u32, limit: u32) -> FmpResult<Value> {
        let page = page.to_string();
        let limit = limit.to_string();
        self.client
            .http
            .get_json(
                "/api/v4/insider-trading",
                &[
                    ("symbol", symbol.as_str()),
                    ("page", page.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await
    }
}
