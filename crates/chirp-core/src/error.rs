//! Domain-level error types.

use std::time::Duration;

use thiserror::Error;

use crate::ports::{DirectoryError, RateLimitError};

/// Domain errors - business rule failures surfaced to callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("authentication required")]
    Unauthorized,

    #[error("{0}")]
    InvalidInput(String),

    #[error("rate limit exceeded, retry in {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<DirectoryError> for DomainError {
    fn from(err: DirectoryError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

impl From<RateLimitError> for DomainError {
    fn from(err: RateLimitError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
