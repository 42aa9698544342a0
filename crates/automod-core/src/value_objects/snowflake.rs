//! Snowflake ID - the platform's 64-bit unique identifier
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since the platform epoch)
//! - Bits 21-17: Worker ID (0-31)
//! - Bits 16-12: Process ID (0-31)
//! - Bits 11-0:  Increment (0-4095)
//!
//! Rules, guilds, roles, channels and users all share this identifier type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Platform Snowflake ID (64-bit)
///
/// The zero value marks an identity the server has not assigned yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(u64);

impl Snowflake {
    /// Platform epoch: 2015-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: u64 = 1_420_070_400_000;

    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Check if the Snowflake is zero (not yet assigned by the server)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    pub fn timestamp(self) -> u64 {
        (self.0 >> 22) + Self::EPOCH
    }

    /// Extract worker ID (0-31)
    #[inline]
    pub fn worker_id(self) -> u8 {
        ((self.0 >> 17) & 0x1F) as u8
    }

    /// Convert timestamp to DateTime<Utc>
    pub fn created_at(self) -> Option<chrono::DateTime<chrono::Utc>> {
        let millis = i64::try_from(self.timestamp()).ok()?;
        chrono::DateTime::from_timestamp_millis(millis)
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<u64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// The API sends ids as strings so 64-bit values survive JavaScript clients
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct SnowflakeVisitor;

        impl Visitor<'_> for SnowflakeVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer representing a snowflake ID")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                Ok(Snowflake(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(Snowflake)
                    .map_err(|_| de::Error::custom("negative snowflake"))
            }

            fn visit_str<E>(self, value: &str) -> Result<Snowflake, E>
            where
                E: de::Error,
            {
                value
                    .parse::<u64>()
                    .map(Snowflake)
                    .map_err(|_| de::Error::custom("invalid snowflake string"))
            }
        }

        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

/// Thread-safe Snowflake generator
///
/// Only servers mint identifiers; the client uses this for substitute
/// executors that stand in for the remote service.
pub struct SnowflakeGenerator {
    worker_id: u8,
    // timestamp in the high bits, increment in the low 12
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new generator with the given worker ID
    ///
    /// # Panics
    /// Panics if worker_id >= 32
    pub fn new(worker_id: u8) -> Self {
        assert!(worker_id < 32, "Worker ID must be < 32");
        Self {
            worker_id,
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new unique, monotonically increasing Snowflake
    pub fn generate(&self) -> Snowflake {
        let now = Self::current_timestamp().saturating_sub(Snowflake::EPOCH) << 12;
        let mut last = self.state.load(Ordering::Acquire);
        loop {
            // Never step backwards; overflowing the increment borrows the next millisecond
            let next = if now > last { now } else { last + 1 };
            match self
                .state
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    let millis = next >> 12;
                    let increment = next & 0xFFF;
                    return Snowflake::new(
                        (millis << 22) | (u64::from(self.worker_id) << 17) | increment,
                    );
                }
                Err(actual) => last = actual,
            }
        }
    }

    /// Get the worker ID of this generator
    pub fn worker_id(&self) -> u8 {
        self.worker_id
    }

    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
