//! Posts API-specific error types.

/// Errors that can occur while talking to the posts service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Paged response did not carry a usable total count
    #[error("Invalid total count header: {0}")]
    InvalidTotalCount(String),

    /// Request never reached the network thread
    #[error("Failed to send request: {0}")]
    Dispatch(String),
}
