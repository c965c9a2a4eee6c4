use super::{ApiError, ApiResult, ErrorResponse};
use crate::config::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fmp_mcp::protocol::{JsonRpcError, JsonRpcResponse, PROTOCOL_VERSION};
use fmp_mcp::server::SERVER_NAME;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "fmp-mcp-server";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub mcp_endpoint: String,
    pub docs: String,
    pub health: String,
}

/// Service info
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses((status = 200, description = "Service info", body = ServiceInfo))
)]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mcp_endpoint: "/mcp".to_string(),
        docs: "/docs".to_string(),
        health: "/health".to_string(),
    })
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        api_key_configured: state.api_key_configured,
    })
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct McpInfo {
    pub name: String,
    pub version: String,
    pub protocol_version: String,
    pub tools: Vec<String>,
}

/// MCP server metadata and tool names
#[utoipa::path(
    get,
    path = "/mcp",
    tag = "mcp",
    responses((status = 200, description = "MCP endpoint metadata", body = McpInfo))
)]
pub async fn mcp_info(State(state): State<Arc<AppState>>) -> Json<McpInfo> {
    Json(McpInfo {
        name: SERVER_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocol_version: PROTOCOL_VERSION.to_string(),
        tools: state.registry().names(),
    })
}

/// MCP JSON-RPC 2.0 endpoint
///
/// The body is taken raw so unparsable JSON still gets a JSON-RPC
/// `-32700` reply instead of an extractor rejection.
#[utoipa::path(
    post,
    path = "/mcp",
    tag = "mcp",
    request_body(content = Value, description = "JSON-RPC 2.0 request", content_type = "application/json"),
    responses(
        (status = 200, description = "JSON-RPC response", body = Value),
        (status = 202, description = "Notification accepted")
    )
)]
pub async fn mcp_rpc(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let Ok(raw) = std::str::from_utf8(&body) else {
        tracing::debug!(len = body.len(), "Rejecting non UTF-8 JSON-RPC body");
        return Json(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
            .into_response();
    };

    match state.mcp.handle_message(raw).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Call one tool directly; the body is the tool's arguments object
#[utoipa::path(
    post,
    path = "/mcp/tools/{tool_name}",
    tag = "tools",
    params(("tool_name" = String, Path, description = "Tool name, e.g. get_eps_surprise")),
    request_body(content = Value, description = "Tool arguments", content_type = "application/json"),
    responses(
        (status = 200, description = "Shaped tool output", body = Value),
        (status = 400, description = "Invalid arguments", body = ErrorResponse),
        (status = 404, description = "Unknown tool", body = ErrorResponse),
        (status = 502, description = "Upstream error", body = ErrorResponse),
        (status = 504, description = "Upstream timeout", body = ErrorResponse)
    )
)]
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(tool_name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    tracing::info!(tool = %tool_name, "Tool call");
    let output = state.registry().call(&tool_name, arguments).await?;
    Ok(Json(output))
}
