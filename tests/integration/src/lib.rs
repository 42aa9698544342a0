//! Integration test utilities for the auto-moderation rule client
//!
//! Provides an in-memory rule store that doubles as a request executor, an
//! HTTP test server in front of it, and rule fixtures.

pub mod helpers;
pub mod store;

pub use fixtures::*;
pub use helpers::*;
pub use store::{RuleStore, BOT_USER_ID};
