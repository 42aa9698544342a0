//! HTTP transport

mod executor;

pub use executor::{HttpExecutor, HttpExecutorError};
