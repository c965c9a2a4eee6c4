use anyhow::Result;
use clap::Parser;

mod api;
mod config;

use config::{Args, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fmp_mcp=info,fmp_mcp_server=info,tower_http=debug".into()),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    let config = ServerConfig::load(args)?;

    tracing::info!("Starting FMP MCP server");
    tracing::info!("Upstream: {}", config.upstream.base_url);

    api::serve(config).await?;

    Ok(())
}
