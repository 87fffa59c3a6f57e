//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Covers failures that happen while turning server payloads into local
/// records. Transport concerns belong to the client crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a payload that is not an object).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was missing or had an unusable shape.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
