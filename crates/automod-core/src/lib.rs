//! # automod-core
//!
//! Domain layer for guild auto-moderation rules: entities, value objects,
//! validation errors, and the request executor port.
//! This crate has no dependency on any HTTP client or runtime.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Action, ActionMetadata, ActionType, AutoModerationRule, EventType, KeywordPresetType,
    TriggerMetadata, TriggerType,
};
pub use error::{Constraint, ExecResult, ExecutorError, ValidationError};
pub use traits::{ApiRequest, RequestExecutor};
pub use value_objects::{
    boxed, present, Field, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
