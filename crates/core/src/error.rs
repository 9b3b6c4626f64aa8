//! Errors shared by every catalog crate.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// A rejected product, asset or user record.
///
/// Permission denials and plan-limit hits are not domain errors; they live in
/// `AuthzError` and `CatalogError::PlanLimitReached`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A draft field is unusable: blank SKU or name, negative price, email
    /// without `@`.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Text that should hold a product, user, asset or log id does not parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No user with the given id in the directory.
    #[error("not found")]
    NotFound,

    /// A SKU already used by another product, or a user removing themselves.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
