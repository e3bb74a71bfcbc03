//! Error model shared by the domain crates.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business-rule failures.
///
/// Transport and infrastructure failures (IO, locks, serialization) live in
/// their own error types; this enum only describes *why the domain said no*.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a validation rule.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The operation would break a domain invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The addressed record does not exist in the caller's tenant.
    #[error("not found")]
    NotFound,

    /// The operation clashes with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is not allowed to perform this operation.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
