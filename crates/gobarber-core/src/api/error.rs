//! Error types for GoBarber API calls.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient).
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent or no response arrived (network error,
    /// timeout, connection refused).
    #[error("Request to {operation} failed: {source}")]
    Request {
        /// The API operation being performed.
        operation: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("API error ({status}) during {operation}: {body}")]
    Status {
        /// The API operation being performed.
        operation: String,
        /// HTTP status returned by the server.
        status: StatusCode,
        /// Response body, as text.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode {operation} response: {reason}")]
    Decode {
        /// The API operation being performed.
        operation: String,
        /// Decoder message.
        reason: String,
    },

    /// The configured base URL or a request path is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// Returns the HTTP status if the server answered with an error status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server rejected the request's credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
