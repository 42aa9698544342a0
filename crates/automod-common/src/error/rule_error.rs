//! Rule client error taxonomy
//!
//! Every failure of a rule operation is a [`RuleError`]: the operation name,
//! the `(guild_id, rule_id)` it targeted, and a [`RuleErrorKind`]. Validation
//! errors are raised locally before any request; every other kind is the
//! executor's classification passed through unchanged.

use std::fmt;
use std::time::Duration;

use automod_core::{ExecutorError, Snowflake, ValidationError};
use serde::{Deserialize, Serialize};

/// The rule operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Modify,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list_auto_moderation_rules",
            Self::Get => "get_auto_moderation_rule",
            Self::Create => "create_auto_moderation_rule",
            Self::Modify => "modify_auto_moderation_rule",
            Self::Delete => "delete_auto_moderation_rule",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network-level failures, kept distinct so callers can tell a timeout or a
/// cancellation from a refused connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    #[error("request timed out")]
    Timeout,

    #[error("request cancelled")]
    Cancelled,

    #[error("{0}")]
    Network(String),
}

/// What went wrong
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleErrorKind {
    /// A bound or required field was violated; nothing was sent
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: {message}")]
    NotFound { message: String },

    /// The caller lacks the manage-guild capability
    #[error("missing permissions: {message}")]
    Permission { message: String },

    /// The remote service throttled the call; this client never retries it
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration, global: bool },

    /// Any other 4xx/5xx rejection
    #[error("HTTP {status}: {message}")]
    ConflictOrServer {
        status: u16,
        code: Option<u32>,
        message: String,
    },

    #[error("transport failure: {0}")]
    Transport(TransportFailure),

    /// A body that could not be encoded, or a response that did not decode
    /// into the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<ExecutorError> for RuleErrorKind {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::NotFound { message } => Self::NotFound { message },
            ExecutorError::Forbidden { message } => Self::Permission { message },
            ExecutorError::RateLimited {
                retry_after,
                global,
            } => Self::RateLimited {
                retry_after,
                global,
            },
            ExecutorError::Status {
                status,
                code,
                message,
            } => Self::ConflictOrServer {
                status,
                code,
                message,
            },
            ExecutorError::Timeout => Self::Transport(TransportFailure::Timeout),
            ExecutorError::Cancelled => Self::Transport(TransportFailure::Cancelled),
            ExecutorError::Network(msg) => Self::Transport(TransportFailure::Network(msg)),
            ExecutorError::InvalidBody(msg) => Self::Decode(msg),
        }
    }
}

/// A failed rule operation with its context
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{operation} failed for guild {guild_id}{}: {kind}", .rule_id.map(|id| format!(" rule {id}")).unwrap_or_default())]
pub struct RuleError {
    pub operation: Operation,
    pub guild_id: Snowflake,
    pub rule_id: Option<Snowflake>,
    #[source]
    pub kind: RuleErrorKind,
}

impl RuleError {
    pub fn new(
        operation: Operation,
        guild_id: Snowflake,
        rule_id: Option<Snowflake>,
        kind: impl Into<RuleErrorKind>,
    ) -> Self {
        Self {
            operation,
            guild_id,
            rule_id,
            kind: kind.into(),
        }
    }

    pub fn kind(&self) -> &RuleErrorKind {
        &self.kind
    }

    /// HTTP status behind this error, if the server answered
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match &self.kind {
            RuleErrorKind::NotFound { .. } => Some(404),
            RuleErrorKind::Permission { .. } => Some(403),
            RuleErrorKind::RateLimited { .. } => Some(429),
            RuleErrorKind::ConflictOrServer { status, .. } => Some(*status),
            RuleErrorKind::Validation(_)
            | RuleErrorKind::Transport(_)
            | RuleErrorKind::Decode(_) => None,
        }
    }

    /// Stable error code for logs and metrics
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match &self.kind {
            RuleErrorKind::Validation(_) => "VALIDATION_ERROR",
            RuleErrorKind::NotFound { .. } => "NOT_FOUND",
            RuleErrorKind::Permission { .. } => "MISSING_PERMISSIONS",
            RuleErrorKind::RateLimited { .. } => "RATE_LIMITED",
            RuleErrorKind::ConflictOrServer { status, .. } if *status >= 500 => "SERVER_ERROR",
            RuleErrorKind::ConflictOrServer { .. } => "REQUEST_REJECTED",
            RuleErrorKind::Transport(TransportFailure::Timeout) => "TIMEOUT",
            RuleErrorKind::Transport(TransportFailure::Cancelled) => "CANCELLED",
            RuleErrorKind::Transport(TransportFailure::Network(_)) => "NETWORK_ERROR",
            RuleErrorKind::Decode(_) => "DECODE_ERROR",
        }
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, RuleErrorKind::Validation(_))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, RuleErrorKind::NotFound { .. })
    }

    #[must_use]
    pub fn is_permission(&self) -> bool {
        matches!(self.kind, RuleErrorKind::Permission { .. })
    }

    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, RuleErrorKind::RateLimited { .. })
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, RuleErrorKind::Transport(_))
    }

    /// How long the server asked callers to wait, for rate-limit errors
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self.kind {
            RuleErrorKind::RateLimited { retry_after, .. } => Some(retry_after),
            _ => None,
        }
    }

    /// The validation failure, if the request never left the client
    #[must_use]
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.kind {
            RuleErrorKind::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for rule operations
pub type RuleResult<T> = Result<T, RuleError>;

/// JSON error body returned by the platform API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub message: String,
    /// Seconds to wait, present on 429 responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
}

impl ApiErrorBody {
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retry_after: None,
            global: None,
        }
    }

    pub fn rate_limited(retry_after: Duration, global: bool) -> Self {
        Self {
            code: 0,
            message: "You are being rate limited.".to_string(),
            retry_after: Some(retry_after.as_secs_f64()),
            global: Some(global),
        }
    }
}
