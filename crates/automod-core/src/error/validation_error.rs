//! Local validation errors
//!
//! Raised before any request is made. Each error names the offending field
//! (as a dotted wire path, e.g. `actions[0].metadata.duration_seconds`) and
//! the bound it violated.

use std::fmt;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// The bound a field failed to satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The field must be provided and non-empty
    Required,
    /// A collection may hold at most this many entries
    MaxItems(u64),
    /// A collection must hold at least this many entries
    MinItems(u64),
    /// A string may hold at most this many code points
    MaxLength(u64),
    /// A number must lie within `min..=max`
    Range { min: u64, max: u64 },
    /// A validator rule without a known bound
    Other(String),
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "is required"),
            Self::MaxItems(max) => write!(f, "must have at most {max} items"),
            Self::MinItems(min) => write!(f, "must have at least {min} items"),
            Self::MaxLength(max) => write!(f, "must be at most {max} characters"),
            Self::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Self::Other(code) => write!(f, "failed check `{code}`"),
        }
    }
}

/// A bound or required-field violation found before the request was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {constraint}")]
pub struct ValidationError {
    pub field: String,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            field: field.into(),
            constraint,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, Constraint::Required)
    }

    pub fn max_items(field: impl Into<String>, max: usize) -> Self {
        Self::new(field, Constraint::MaxItems(max as u64))
    }

    /// Fail with `MaxItems` when `len` exceeds `max`
    pub fn check_max_items(field: &str, len: usize, max: usize) -> Result<(), Self> {
        if len > max {
            return Err(Self::max_items(field, max));
        }
        Ok(())
    }

    /// Convert `validator` output into a single error, prefixing field paths
    ///
    /// When several fields fail, the lexicographically first path is reported
    /// so the result does not depend on hash map ordering.
    pub fn from_validator(prefix: &str, errors: &ValidationErrors) -> Self {
        let mut flat = Vec::new();
        flatten(prefix, errors, &mut flat);
        flat.sort_by(|a, b| a.field.cmp(&b.field));
        flat.into_iter()
            .next()
            .unwrap_or_else(|| Self::new(prefix, Constraint::Other("unknown".to_string())))
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn flatten(prefix: &str, errors: &ValidationErrors, out: &mut Vec<ValidationError>) {
    for (field, kind) in errors.errors() {
        let path = join(prefix, field.as_ref());
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(ValidationError::new(path.clone(), constraint_of(error)));
                }
            }
            ValidationErrorsKind::Struct(inner) => flatten(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn constraint_of(error: &validator::ValidationError) -> Constraint {
    let param = |name: &str| {
        let value = error.params.get(name)?;
        value.as_u64().or_else(|| value.as_f64().map(|f| f as u64))
    };
    let is_collection = error
        .params
        .get("value")
        .is_some_and(serde_json::Value::is_array);

    match error.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), _) if min > 0 && error_value_len(error).is_some_and(|len| len < min) => {
                if is_collection {
                    Constraint::MinItems(min)
                } else {
                    Constraint::Required
                }
            }
            (_, Some(max)) if is_collection => Constraint::MaxItems(max),
            (_, Some(max)) => Constraint::MaxLength(max),
            _ => Constraint::Other("length".to_string()),
        },
        "range" => Constraint::Range {
            min: param("min").unwrap_or(0),
            max: param("max").unwrap_or(u64::MAX),
        },
        other => Constraint::Other(other.to_string()),
    }
}

fn error_value_len(error: &validator::ValidationError) -> Option<u64> {
    match error.params.get("value")? {
        serde_json::Value::Array(items) => Some(items.len() as u64),
        serde_json::Value::String(s) => Some(s.chars().count() as u64),
        _ => None,
    }
}
