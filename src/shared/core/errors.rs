use thiserror::Error;

use crate::shared::infrastructure::document_store::StoreError;

/// Failure of a use case handler, independent of the transport that invoked it.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("domain rejected: {0}")]
    Domain(String),

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

impl From<StoreError> for ApplicationError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists(_) | StoreError::RevisionMismatch(_) => {
                ApplicationError::Conflict(error.to_string())
            }
            other => ApplicationError::Store(other),
        }
    }
}
