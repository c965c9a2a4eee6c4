// MCP (Model Context Protocol) layer for Financial Modeling Prep data:
// protocol types, the tool registry with the six FMP tools, and the
// JSON-RPC dispatcher shared by the HTTP server and the stdio binary

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use error::ToolError;
pub use server::McpServer;
pub use tools::{fmp_registry, Tool, ToolRegistry, FMP_TOOL_NAMES};
