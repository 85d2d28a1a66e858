//! Error types for the Planning Center client.

use thiserror::Error;

/// Errors that can occur when talking to the Planning Center API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Missing or rejected access token
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A link the client needed to follow was not in the response
    #[error("Missing link: {0}")]
    MissingLink(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Rate limited by server
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
