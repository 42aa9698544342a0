//! Error types

mod rule_error;

pub use rule_error::{
    ApiErrorBody, Operation, RuleError, RuleErrorKind, RuleResult, TransportFailure,
};
