/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Stored attributes could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for pco_core::PcoError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SerializationError(e) => pco_core::PcoError::Serialization(e),
            StorageError::Database(e) => pco_core::PcoError::from(e),
        }
    }
}
