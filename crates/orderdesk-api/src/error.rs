//! # API Error Type
//!
//! Typed errors for the order API client, with user-friendly messages.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Error Flow                                         │
//! │                                                                         │
//! │  reqwest::Error ──► ApiError::Transport  "Cannot reach order server.." │
//! │  HTTP 4xx/5xx   ──► ApiError::Status     "Order server error (HTTP..)" │
//! │  bad JSON       ──► ApiError::Decode                                    │
//! │                                                                         │
//! │  The front end surfaces the Display text as a blocking notice and      │
//! │  leaves all session state untouched. No retries anywhere.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::StatusCode;
use thiserror::Error;

// =============================================================================
// Api Error
// =============================================================================

/// Errors returned by [`crate::OrderApi`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Network or transport failure (connect, timeout, TLS).
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A response payload could not be decoded.
    #[error("invalid JSON from the order server: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Converts a `reqwest::Error` into a transport error with a
    /// user-friendly message.
    pub fn transport(base_url: &str, err: &reqwest::Error) -> Self {
        let message = if err.is_connect() {
            format!("Cannot reach the order server at {base_url}")
        } else if err.is_timeout() {
            format!("Connection to {base_url} timed out")
        } else if err.is_builder() {
            format!("Invalid order server URL: {base_url}")
        } else {
            format!("Network error communicating with {base_url}: {err}")
        };
        ApiError::Transport { message }
    }

    /// Converts a non-success HTTP status into a status error.
    pub fn status(status: StatusCode) -> Self {
        let message = match status.as_u16() {
            404 => "Order server endpoint not found".to_string(),
            s if s >= 500 => format!("Order server error (HTTP {s})"),
            s => format!("Unexpected response from the order server (HTTP {s})"),
        };
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Wraps a JSON decode failure.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        ApiError::Decode {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================
