//! Error types for the FMP client.

use serde::Deserialize;

/// Result type for FMP client operations.
pub type FmpResult<T> = Result<T, FmpError>;

/// Errors surfaced by the upstream client.
///
/// Nothing here is retried; every variant reaches the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum FmpError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// FMP returned a non-2xx status, or a 2xx body with an error envelope.
    #[error("FMP API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The upstream body was not valid JSON.
    #[error("Malformed upstream response: {0}")]
    Json(#[from] serde_json::Error),

    /// The bounded request timeout elapsed.
    #[error("Upstream request timed out")]
    Timeout,

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

// Request URLs carry `apikey`, so they are stripped before the error is kept.
impl From<reqwest::Error> for FmpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err.without_url())
        }
    }
}

/// Longest slice of an unstructured error body kept in messages.
const MAX_ERROR_BODY: usize = 512;

impl FmpError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Upstream HTTP status, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a status code and response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => envelope.message().unwrap_or_default(),
            Err(_) => String::new(),
        };

        let message = if message.is_empty() {
            truncate(body.trim(), MAX_ERROR_BODY)
        } else {
            message
        };

        Self::Api { status, message }
    }

    /// FMP reports some failures (bad key, plan limits) as a 2xx object
    /// carrying `Error Message`.
    pub fn from_envelope(status: u16, body: &serde_json::Value) -> Option<Self> {
        let message = body.as_object()?.get("Error Message")?.as_str()?;
        Some(Self::Api {
            status,
            message: message.to_string(),
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Error body shapes used by FMP.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    message: Option<String>,
}

impl ErrorEnvelope {
    fn message(self) -> Option<String> {
        self.error_message.or(self.message)
    }
}
