use thiserror::Error;

/// Failures surfaced by repository implementations. Services map these onto
/// operation-specific error codes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document validation failed: {0}")]
    Validation(#[from] models::errors::ModelError),
    #[error("duplicate key: {0}")]
    Duplicate(String),
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub(crate) fn backend(e: mongodb::error::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

pub(crate) fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(&*e.kind, ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == 11000)
}
