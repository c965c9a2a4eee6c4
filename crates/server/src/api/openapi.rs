// OpenAPI document served at /openapi.json

use super::{handlers, ErrorResponse};
use axum::Json;
use fmp_mcp_core::{
    AnalystConsensus, AnalystRating, EarningsCalendarEvent, EarningsReport, IndicatorKind,
    IndicatorOutput, IndicatorValue, InsiderActivity,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FMP MCP Server",
        description = "Financial Modeling Prep data exposed as MCP tools. Tool outputs \
                       are listed under components."
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::mcp_info,
        handlers::mcp_rpc,
        handlers::call_tool
    ),
    components(schemas(
        ErrorResponse,
        handlers::ServiceInfo,
        handlers::HealthResponse,
        handlers::McpInfo,
        EarningsReport,
        EarningsCalendarEvent,
        IndicatorKind,
        IndicatorValue,
        IndicatorOutput,
        AnalystRating,
        AnalystConsensus,
        InsiderActivity
    )),
    tags(
        (name = "service", description = "Service info and health"),
        (name = "mcp", description = "MCP JSON-RPC endpoint"),
        (name = "tools", description = "Direct tool invocation")
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
