//! Error types for the finance tracker domain.
//!
//! Messages on the business variants are user-facing; the HTTP layer
//! surfaces them verbatim.

use thiserror::Error;

/// Result type alias for domain operations.
pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Error taxonomy for the domain services.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An entry field failed a validation rule. Recoverable by the caller
    /// correcting input.
    #[error("{0}")]
    Validation(String),

    /// A business rule outside entry validation was violated (duplicate
    /// email on registration).
    #[error("{0}")]
    BusinessRule(String),

    /// Authentication failed. Carries exactly "user not found" or
    /// "invalid password".
    #[error("{0}")]
    Authentication(String),

    /// update/delete called on an entry that has no identifier yet. Caller
    /// misuse, not bad user input; never mapped to a 400.
    #[error("entry id is required for {0}")]
    MissingId(&'static str),

    /// Record store failure.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
