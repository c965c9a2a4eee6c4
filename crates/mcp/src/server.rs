// MCP server: JSON-RPC dispatch over a shared tool registry
//
// The same dispatcher backs `POST /mcp` in the HTTP server and the
// newline-delimited stdio transport of the `fmp-mcp` binary.

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

pub const SERVER_NAME: &str = "fmp-mcp";

/// Upper bound for one stdio message
const MAX_LINE_LENGTH: usize = 4 * 1024 * 1024;

const INSTRUCTIONS: &str = "Financial Modeling Prep data for trading strategy research: \
    earnings surprises and calendar, RSI/SMA indicators, analyst price targets and \
    insider trading. Symbols are exchange tickers such as AAPL or MSFT; dates use YYYY-MM-DD.";

pub struct McpServer {
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::from_shared(Arc::new(registry))
    }

    pub fn from_shared(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn server_info() -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle one raw JSON-RPC message. `None` means nothing should be sent
    /// back (the message was a notification).
    pub async fn handle_message(&self, raw: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => self.handle_value(value).await,
            Err(e) => {
                tracing::debug!(error = %e, "Unparsable JSON-RPC message");
                Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
            }
        }
    }

    /// Handle an already-parsed JSON value
    pub async fn handle_value(&self, value: Value) -> Option<JsonRpcResponse> {
        let id = value.get("id").cloned().unwrap_or(Value::Null);

        if value.is_array() {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request("Batch requests are not supported"),
            ));
        }

        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid Request: {}", e)),
                ))
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        };

        let params = request.params.unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, &self.initialize(params)),
            "ping" => JsonRpcResponse::success(id, &serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => match self.call_tool(params).await {
                Ok(result) => JsonRpcResponse::success(id, &result),
                Err(error) => JsonRpcResponse::error(id, error),
            },
            method => {
                tracing::debug!(method = %method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };

        Some(response)
    }

    fn initialize(&self, params: Value) -> InitializeResult {
        let requested = serde_json::from_value::<InitializeParams>(params).ok();
        if let Some(client) = requested.as_ref().and_then(|p| p.client_info.as_ref()) {
            tracing::info!(client = %client.name, version = %client.version, "MCP client connected");
        }

        let protocol_version = requested
            .map(|p| p.protocol_version)
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(&v.as_str()))
            .unwrap_or_else(|| PROTOCOL_VERSION.to_string());

        InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: Self::server_info(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    /// Caller mistakes become JSON-RPC errors; upstream failures become a
    /// `CallToolResult` with `isError` set.
    async fn call_tool(&self, params: Value) -> Result<CallToolResult, JsonRpcError> {
        let params: CallToolParams = serde_json::from_value(params).map_err(|e| {
            JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e))
        })?;

        tracing::info!(tool = %params.name, "Tool call");

        match self.registry.call(&params.name, params.arguments).await {
            Ok(output) => Ok(CallToolResult::success(output)),
            Err(e) if e.is_client_error() => Err(JsonRpcError::invalid_params(e.to_string())),
            Err(e) => Ok(CallToolResult::failure(e.to_string())),
        }
    }

    /// Serve newline-delimited JSON-RPC until the reader closes
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let response = match line {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(&line).await,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    tracing::warn!(max = MAX_LINE_LENGTH, "Dropping oversized message");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::invalid_request("Message too large"),
                    ))
                }
                Err(LinesCodecError::Io(e)) => {
                    return Err(e).context("Failed to read from MCP transport")
                }
            };

            if let Some(response) = response {
                let encoded = serde_json::to_string(&response)?;
                sink.send(encoded)
                    .await
                    .context("Failed to write to MCP transport")?;
            }
        }

        tracing::info!("MCP transport closed");
        Ok(())
    }

    pub async fn serve_stdio(&self) -> Result<()> {
        tracing::info!(tools = self.registry.len(), "MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}
