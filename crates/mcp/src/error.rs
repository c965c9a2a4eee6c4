// Tool execution errors

use fmp_client::FmpError;
use fmp_mcp_core::ValidationError;

/// Why a tool call did not produce output
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] ValidationError),

    /// Upstream failed; `what` names the data, e.g. "RSI data"
    #[error("Error fetching {what}: {source}")]
    Upstream {
        what: String,
        #[source]
        source: FmpError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn upstream(what: impl Into<String>, source: FmpError) -> Self {
        Self::Upstream {
            what: what.into(),
            source,
        }
    }

    /// Caller's fault: bad tool name or arguments
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArguments(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Upstream { source, .. } if source.is_timeout())
    }
}
