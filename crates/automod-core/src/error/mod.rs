//! Domain errors - local validation failures and executor failures

mod executor_error;
mod validation_error;

pub use executor_error::{ExecResult, ExecutorError};
pub use validation_error::{Constraint, ValidationError};
