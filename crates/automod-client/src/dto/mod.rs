//! Data transfer objects for the rule endpoints

pub mod requests;

pub use requests::{CreateAutoModerationRule, ModifyAutoModerationRule};
