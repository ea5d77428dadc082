//! API Error Types
//!
//! Failure taxonomy for backend calls. Local form validation never produces
//! one of these; only a submission that actually went to the network can.

use thiserror::Error;

/// Error from a backend call. All variants are transient and retryable;
/// none is fatal to the page.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Request never reached the backend (DNS, refused connection, CORS).
    #[error("network error: {0}")]
    Network(String),

    /// No response within the request timeout.
    #[error("request timed out")]
    Timeout,

    /// Backend answered with a non-2xx status.
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}
