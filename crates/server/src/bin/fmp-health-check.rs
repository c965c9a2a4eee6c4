// Health check for a running FMP MCP server
//
// Exits 0 when every check passes, 1 otherwise. With `--probe` it also
// lists the tools over JSON-RPC and calls each one once.

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use std::time::Duration;

const EXPECTED_TOOLS: [&str; 6] = [
    "get_earnings_calendar",
    "get_eps_surprise",
    "get_insider_trading",
    "get_price_targets",
    "get_rsi",
    "get_sma",
];

#[derive(Parser, Debug)]
#[command(name = "fmp-health-check")]
#[command(about = "Health check for the FMP MCP server", long_about = None)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Also call every tool once against live data
    #[arg(long)]
    probe: bool,
}

/// One smoke-test call and the fields its output must carry
struct ProbeCase {
    tool: &'static str,
    arguments: Value,
    required_fields: &'static [&'static str],
}

fn probe_cases() -> Vec<ProbeCase> {
    vec![
        ProbeCase {
            tool: "get_eps_surprise",
            arguments: json!({"symbol": "AAPL"}),
            required_fields: &["eps", "eps_estimated"],
        },
        ProbeCase {
            tool: "get_rsi",
            arguments: json!({"symbol": "MSFT", "time_period": 14}),
            required_fields: &["symbol", "values"],
        },
        ProbeCase {
            tool: "get_sma",
            arguments: json!({"symbol": "NVDA", "time_period": 20}),
            required_fields: &["symbol", "values"],
        },
        ProbeCase {
            tool: "get_price_targets",
            arguments: json!({"symbol": "AAPL"}),
            required_fields: &["target_consensus", "target_high", "target_low"],
        },
        ProbeCase {
            tool: "get_insider_trading",
            arguments: json!({"symbol": "TSLA", "limit": 5}),
            required_fields: &["transaction_type"],
        },
        ProbeCase {
            tool: "get_earnings_calendar",
            arguments: json!({}),
            required_fields: &["symbol", "date"],
        },
    ]
}

struct HealthChecker {
    http: reqwest::Client,
    base_url: String,
}

impl HealthChecker {
    fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to connect to {}", url))
    }

    async fn check_health(&self) -> Result<()> {
        let response = self.get("/health").await?;
        let status = response.status();
        ensure!(status.is_success(), "/health responded with {}", status);

        let body: Value = response.json().await.context("/health returned invalid JSON")?;
        let reported = body["status"].as_str().unwrap_or("unknown");
        ensure!(reported == "healthy", "Server status is not healthy: {}", reported);
        ensure!(
            body["api_key_configured"] == true,
            "API key is NOT configured"
        );
        Ok(())
    }

    async fn check_mcp_endpoint(&self) -> Result<()> {
        let response = self.get("/mcp").await?;
        let status = response.status();
        ensure!(status.is_success(), "/mcp responded with {}", status);
        Ok(())
    }

    async fn rpc(&self, id: u64, method: &str, params: Value) -> Result<Value> {
        let url = format!("{}/mcp", self.base_url);
        let body: Value = self
            .http
            .post(&url)
            .json(&json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .send()
            .await
            .with_context(|| format!("Failed to call {}", method))?
            .json()
            .await
            .with_context(|| format!("{} returned invalid JSON", method))?;

        if let Some(error) = body.get("error") {
            bail!("{} failed: {}", method, error);
        }
        Ok(body["result"].clone())
    }

    async fn check_tool_list(&self) -> Result<()> {
        let result = self.rpc(1, "tools/list", json!({})).await?;
        let listed: Vec<&str> = result["tools"]
            .as_array()
            .context("tools/list returned no tools array")?
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();

        let missing: Vec<&str> = EXPECTED_TOOLS
            .iter()
            .copied()
            .filter(|name| !listed.contains(name))
            .collect();
        ensure!(missing.is_empty(), "Tools missing from tools/list: {:?}", missing);
        Ok(())
    }

    async fn probe_tool(&self, id: u64, case: &ProbeCase) -> Result<usize> {
        let result = self
            .rpc(
                id,
                "tools/call",
                json!({"name": case.tool, "arguments": case.arguments}),
            )
            .await?;

        if result["isError"] == true {
            let text = result["content"][0]["text"].as_str().unwrap_or("unknown error");
            bail!("{} returned an error: {}", case.tool, text);
        }

        let structured = &result["structuredContent"];
        let (first, count) = match structured.get("result").and_then(Value::as_array) {
            Some(records) => (records.first(), records.len()),
            None => (Some(structured), 1),
        };

        // An empty list is a valid answer (no filings, no events)
        if let Some(record) = first {
            for field in case.required_fields {
                ensure!(
                    record.get(*field).is_some(),
                    "{} output is missing '{}'",
                    case.tool,
                    field
                );
            }
        }
        Ok(count)
    }

    /// Run every check; returns the number of failures
    async fn run(&self, probe: bool) -> usize {
        let mut failures = 0;

        match self.check_health().await {
            Ok(()) => tracing::info!("Server is healthy and the API key is configured"),
            Err(e) => {
                tracing::error!("Health check failed: {:#}", e);
                failures += 1;
            }
        }

        match self.check_mcp_endpoint().await {
            Ok(()) => tracing::info!("MCP endpoint is responding"),
            Err(e) => {
                tracing::error!("MCP endpoint check failed: {:#}", e);
                failures += 1;
            }
        }

        if !probe {
            return failures;
        }

        match self.check_tool_list().await {
            Ok(()) => tracing::info!("All {} tools are listed", EXPECTED_TOOLS.len()),
            Err(e) => {
                tracing::error!("Tool listing failed: {:#}", e);
                failures += 1;
            }
        }

        for (id, case) in (2u64..).zip(probe_cases().iter()) {
            match self.probe_tool(id, case).await {
                Ok(count) => tracing::info!(tool = case.tool, records = count, "Tool responded"),
                Err(e) => {
                    tracing::error!(tool = case.tool, "Tool probe failed: {:#}", e);
                    failures += 1;
                }
            }
        }

        failures
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let base_url = format!("http://{}:{}", args.host, args.port);
    tracing::info!("Checking FMP MCP server health at {}", base_url);

    let checker = HealthChecker::new(base_url, Duration::from_secs(args.timeout_secs))?;
    let failures = checker.run(args.probe).await;

    if failures > 0 {
        tracing::error!("{} check(s) failed. Server may not be functioning correctly.", failures);
        std::process::exit(1);
    }

    tracing::info!("All checks passed. Server is healthy.");
    Ok(())
}
