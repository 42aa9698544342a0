//! Rule operations

pub mod rules;

pub use rules::{RuleClient, AUDIT_LOG_REASON};
