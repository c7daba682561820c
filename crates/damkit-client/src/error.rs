//! Client error types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server completed the request with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Request { status: u16, message: String },

    /// Transport failure before any HTTP status was available
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A success-status response body was not valid JSON
    #[error("Response parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build a request error from a raw response body.
    ///
    /// Prefers a `message` (then `error`) string field from a JSON body;
    /// falls back to the status line when the body is not usable.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });

        Self::Request {
            status: status.as_u16(),
            message,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Request { status: 404, .. })
    }

    /// Check if this is an authentication/authorization failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Request { status: 401 | 403, .. })
    }
}
