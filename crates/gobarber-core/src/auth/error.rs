//! Error types for authentication operations.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Authentication-related errors.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Sign-in failed. Network failures and rejected credentials are not
    /// distinguished here; inspect the source for details.
    #[error("Authentication failed: {0}")]
    Authentication(#[source] ApiError),

    /// The operation needs a signed-in user.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The session could not be read from or written to storage.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The user record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for authentication operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
