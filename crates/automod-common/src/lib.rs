//! # automod-common
//!
//! Shared utilities: client configuration, the rule error taxonomy, and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{ApiConfig, AppSettings, ClientConfig, ConfigError, Environment};
pub use error::{ApiErrorBody, Operation, RuleError, RuleErrorKind, RuleResult, TransportFailure};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
