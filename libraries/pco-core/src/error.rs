/// Core error types for the skill
use thiserror::Error;

/// Result type alias using `PcoError`
pub type Result<T> = std::result::Result<T, PcoError>;

/// Core error type shared by the skill crates
#[derive(Error, Debug)]
pub enum PcoError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl PcoError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for PcoError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
