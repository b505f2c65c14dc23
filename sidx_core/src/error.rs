use thiserror::Error;

use crate::index::IndexKind;

/// The main error type for building secondary index queries.
/// Every variant is raised synchronously, either by a kind-specific
/// constructor or by `build()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Option combination errors
    #[error("Illegal query configuration: {0}")]
    IllegalConfiguration(String),

    // Key type errors
    #[error("Index key type mismatch: expected {expected} key, got {actual} key")]
    TypeMismatch {
        expected: IndexKind,
        actual: IndexKind,
    },

    // Presence errors
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
}

impl Error {
    pub(crate) fn illegal(msg: impl Into<String>) -> Self {
        Error::IllegalConfiguration(msg.into())
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Error::MissingRequiredField(field.into())
    }

    /// Returns true if the error came from an illegal option combination
    /// or a missing field detected by `build()`
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::IllegalConfiguration(_) | Error::MissingRequiredField(_)
        )
    }

    /// Returns true if the error is a key of the wrong kind
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
