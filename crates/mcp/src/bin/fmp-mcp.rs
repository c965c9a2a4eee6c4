// Standalone MCP server binary (JSON-RPC over stdio)

use anyhow::{Context, Result};
use clap::Parser;
use fmp_client::{FmpClient, DEFAULT_BASE_URL};
use fmp_mcp::{fmp_registry, McpServer};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "fmp-mcp")]
#[command(about = "Financial Modeling Prep tools over MCP stdio", long_about = None)]
struct Args {
    /// FMP API key
    #[arg(long, env = "FMP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// FMP base URL
    #[arg(long, env = "FMP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FMP_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .context("FMP_API_KEY environment variable is required")?;

    let client = FmpClient::builder()
        .api_key(api_key)
        .base_url(args.base_url)
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()
        .context("Failed to build FMP client")?;

    tracing::info!("FMP MCP server starting (base URL {})", client.base_url());

    let server = McpServer::new(fmp_registry(client));
    server.serve_stdio().await
}
