use anyhow::{bail, Context, Result};
use clap::Parser;
use fmp_client::{ClientConfig, FmpClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use fmp_mcp::{fmp_registry, McpServer, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Command line / environment. Every setting is optional here so the
/// config file can fill the gaps.
#[derive(Parser, Debug, Default)]
#[command(name = "fmp-mcp-server")]
#[command(about = "Financial Modeling Prep data as MCP tools over HTTP", long_about = None)]
pub struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "FMP_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// FMP API key
    #[arg(long, env = "FMP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// FMP base URL
    #[arg(long, env = "FMP_BASE_URL")]
    pub base_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "FMP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Host to bind to
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

/// Contents of the optional TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub upstream: UpstreamSection,

    #[serde(default)]
    pub server: ListenSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse configuration file")
    }
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upstream: ClientConfig,
}

impl ServerConfig {
    /// Read the config file named by `args` (if any) and resolve
    pub fn load(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    /// CLI/env values win over the file, the file wins over defaults
    pub fn resolve(args: Args, file: FileConfig) -> Result<Self> {
        let api_key = match args.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => bail!("FMP_API_KEY environment variable is required"),
        };

        let base_url = args
            .base_url
            .or(file.upstream.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match args.timeout_secs.or(file.upstream.timeout_secs) {
            Some(0) => bail!("Upstream timeout must be at least one second"),
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_TIMEOUT,
        };

        let mut upstream = ClientConfig::with_base_url(api_key, &base_url)
            .with_context(|| format!("Invalid FMP base URL: {}", base_url))?;
        upstream.timeout = timeout;

        Ok(Self {
            host: args
                .host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            upstream,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
    pub api_key_configured: bool,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = FmpClient::from_config(config.upstream.clone())
            .context("Failed to create FMP client")?;
        Ok(Self::from_registry(fmp_registry(client)))
    }

    pub fn from_registry(registry: ToolRegistry) -> Self {
        Self {
            mcp: Arc::new(McpServer::new(registry)),
            api_key_configured: true,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.mcp.registry()
    }
}
