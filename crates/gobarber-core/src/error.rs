//! Error types for GoBarber Core.

use thiserror::Error;

use crate::api::ApiError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::forms::FormError;
use crate::storage::StorageError;
use crate::validation::ValidationErrors;

/// Core error type for GoBarber operations.
#[derive(Error, Debug)]
pub enum GoBarberError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Rejected form input
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Form request errors
    #[error("Form error: {0}")]
    Form(#[from] FormError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for GoBarber operations.
pub type Result<T> = std::result::Result<T, GoBarberError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    #[test]
    fn test_error_storage_conversion() {
        let err: GoBarberError = StorageError::Poisoned.into();
        match err {
            GoBarberError::Storage(StorageError::Poisoned) => {}
            _ => panic!("Expected Storage error variant"),
        }
    }

    #[test]
    fn test_error_auth_conversion() {
        let err: GoBarberError = AuthError::NotAuthenticated.into();
        assert!(matches!(err, GoBarberError::Auth(AuthError::NotAuthenticated)));
        assert_eq!(format!("{}", err), "Authentication error: Not authenticated");
    }

    #[test]
    fn test_error_config() {
        let err: GoBarberError = ConfigError::NotFound("/tmp/missing.toml".to_string()).into();
        let msg = format!("{}", err);
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("/tmp/missing.toml"));
    }

    #[test]
    fn test_error_validation_is_transparent() {
        let errors = ValidationErrors::new(vec![Violation::new("email", "E-mail obrigatório")]);
        let err: GoBarberError = errors.into();
        assert!(format!("{}", err).starts_with("Validation failed"));
    }

    #[test]
    fn test_error_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GoBarberError = io_err.into();
        assert!(matches!(err, GoBarberError::Io(_)));
    }
}
