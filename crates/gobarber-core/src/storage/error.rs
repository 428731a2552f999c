//! Error types for storage operations.

use thiserror::Error;

/// Storage-related errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// I/O error occurred while reading or writing the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;
