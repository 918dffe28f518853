//! Storage operation errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Carries the client-facing message
    #[error("{0}")]
    NotFound(String),

    #[error("File '{0}' already exists")]
    AlreadyExists(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
