//! Server-issued identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::DomainError;

/// Identifier of a record owned by the management API.
///
/// The server may issue numbers or strings. The value is kept exactly as
/// received (`2.0` stays a float, ids past `i64::MAX` stay unsigned), and
/// equality is strict: `1` and `"1"` are different identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(Number),
    Text(String),
}

impl RecordId {
    /// Read an identifier out of an arbitrary JSON value.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::Number(n) => Ok(RecordId::Number(n.clone())),
            Value::String(s) => Ok(RecordId::Text(s.clone())),
            Value::Null => Err(DomainError::invalid_id("identifier is null")),
            other => Err(DomainError::invalid_id(format!("unsupported shape: {other}"))),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            RecordId::Number(n) => Value::Number(n.clone()),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordId::Number(n) => core::fmt::Display::fmt(n, f),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// Parses command-line style input: all-digit strings become numbers.
impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_id("identifier is empty"));
        }
        match trimmed.parse::<i64>() {
            Ok(n) => Ok(RecordId::from(n)),
            Err(_) => Ok(RecordId::Text(trimmed.to_string())),
        }
    }
}
