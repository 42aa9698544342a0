//! # automod-client
//!
//! Application layer: the auto-moderation rule client, its request DTOs, and
//! an HTTP executor for the platform REST API.

pub mod dto;
pub mod http;
pub mod routes;
pub mod services;

pub use dto::{CreateAutoModerationRule, ModifyAutoModerationRule};
pub use self::http::{HttpExecutor, HttpExecutorError};
pub use services::{RuleClient, AUDIT_LOG_REASON};
