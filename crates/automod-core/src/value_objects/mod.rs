//! Value objects - immutable types that represent domain concepts

mod field;
mod snowflake;

pub use field::{boxed, present, Field};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
