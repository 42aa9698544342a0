//! Ports - interfaces the domain needs from the outside world

mod executor;

pub use executor::{ApiRequest, RequestExecutor};
