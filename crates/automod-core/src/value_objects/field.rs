//! Tri-state field for sparse update payloads
//!
//! A plain `bool` or `u8` cannot tell "leave unchanged" apart from "set to
//! false/zero". `Field<T>` makes the unset state a distinct variant so a
//! PATCH body only ever carries the keys the caller touched.
//!
//! Struct fields of this type must be declared with
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]`:
//! `Absent` is then omitted entirely and `Present(v)` is encoded as `v`.
//! There is no "present but null" state.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that is either deliberately provided or not provided at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Field<T> {
    /// The caller did not set this field; it is omitted from the payload
    #[default]
    Absent,
    /// The caller set this field, possibly to a falsy value
    Present(T),
}

/// Mark a value as explicitly provided
pub fn present<T>(value: T) -> Field<T> {
    Field::Present(value)
}

/// Move a value onto the heap for callers that need an owned pointer
/// rather than the wrapper itself
pub fn boxed<T>(value: T) -> Box<T> {
    Box::new(value)
}

impl<T> Field<T> {
    #[inline]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub const fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Absent => Field::Absent,
            Self::Present(value) => Field::Present(value),
        }
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }

    /// `None` becomes `Absent`; there is no way to send an explicit null
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Self::Absent => Field::Absent,
            Self::Present(value) => Field::Present(f(value)),
        }
    }

    /// Overwrite `target` only when a value was provided
    pub fn apply_to(&self, target: &mut T)
    where
        T: Clone,
    {
        if let Self::Present(value) = self {
            target.clone_from(value);
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Present(value)
    }
}


impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Present(value) => value.serialize(serializer),
            // Only reachable when the skip attribute is missing on the owning field
            Self::Absent => serializer.serialize_unit(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Present)
    }
}
