//! Errors reported by a request executor
//!
//! The executor owns the transport: it classifies HTTP statuses and network
//! failures into these kinds, and the rule client passes them through.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single request/response round trip
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutorError {
    /// 404 - the resource does not exist under the requested path
    #[error("not found: {message}")]
    NotFound { message: String },

    /// 403 - the caller lacks a required capability
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// 429 - the remote service throttled the request
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration, global: bool },

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Status {
        status: u16,
        /// Platform-specific JSON error code, when the body carried one
        code: Option<u32>,
        message: String,
    },

    /// The request did not complete within its deadline
    #[error("request timed out")]
    Timeout,

    /// The request was abandoned before a response arrived
    #[error("request cancelled")]
    Cancelled,

    /// Connection, TLS or protocol failure
    #[error("network error: {0}")]
    Network(String),

    /// A successful response whose body was not valid JSON
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

impl ExecutorError {
    /// HTTP status this error corresponds to, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Forbidden { .. } => Some(403),
            Self::RateLimited { .. } => Some(429),
            Self::Status { status, .. } => Some(*status),
            Self::Timeout | Self::Cancelled | Self::Network(_) | Self::InvalidBody(_) => None,
        }
    }
}

/// Result type for executor round trips
pub type ExecResult<T> = Result<T, ExecutorError>;
