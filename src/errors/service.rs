use thiserror::Error;

use super::{AllocatorError, RepositoryError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Short code space exhausted after {0} attempts")]
    CodeSpaceExhausted(u32),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::InvalidData(msg) => ServiceError::Validation(msg),
            RepositoryError::Conflict(msg) => ServiceError::Internal(msg),
            RepositoryError::Database(e) => ServiceError::Internal(e.to_string()),
        }
    }
}

impl From<AllocatorError> for ServiceError {
    fn from(err: AllocatorError) -> Self {
        match err {
            AllocatorError::CodeSpaceExhausted { attempts } => {
                ServiceError::CodeSpaceExhausted(attempts)
            }
            AllocatorError::Repository(e) => e.into(),
        }
    }
}
