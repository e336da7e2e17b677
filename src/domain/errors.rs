//! Domain error types
//!
//! This module defines the error hierarchy for cognito-backup.
//! Errors raised by the AWS SDK are flattened into [`DirectoryError`] so that
//! no SDK types leak past the adapter layer.

use thiserror::Error;

/// Main cognito-backup error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum CognitoBackupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Identity directory (remote API) errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Restore process errors
    #[error("Restore error: {0}")]
    Restore(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Identity directory errors
///
/// Errors that occur when talking to the remote user pool service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Generic service failure for a named operation
    #[error("{operation} failed: {message}")]
    Service { operation: String, message: String },

    /// The service throttled the request
    #[error("{operation} was throttled: {message}")]
    Throttled { operation: String, message: String },

    /// The identity already exists (username or group name taken)
    #[error("{operation} conflict: {message}")]
    Conflict { operation: String, message: String },

    /// The pool, user or group does not exist
    #[error("{operation} target not found: {message}")]
    NotFound { operation: String, message: String },

    /// More user pools than a single listing page can hold
    #[error(
        "Account has more than {max} user pools; listing beyond one page is not supported"
    )]
    TooManyPools { max: i32 },

    /// A record is missing a field required by the remote call
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl DirectoryError {
    /// Builds a [`DirectoryError::Service`]
    pub fn service(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DirectoryError::Service {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CognitoBackupError {
    fn from(err: std::io::Error) -> Self {
        CognitoBackupError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CognitoBackupError {
    fn from(err: serde_json::Error) -> Self {
        CognitoBackupError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CognitoBackupError {
    fn from(err: toml::de::Error) -> Self {
        CognitoBackupError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CognitoBackupError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_directory_error_conversion() {
        let dir_err = DirectoryError::service("ListUsers", "boom");
        let err: CognitoBackupError = dir_err.into();
        assert!(matches!(err, CognitoBackupError::Directory(_)));
        assert_eq!(err.to_string(), "Directory error: ListUsers failed: boom");
    }

    #[test]
    fn test_too_many_pools_message() {
        let err = DirectoryError::TooManyPools { max: 60 };
        assert!(err.to_string().contains("more than 60 user pools"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CognitoBackupError = io_err.into();
        assert!(matches!(err, CognitoBackupError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: CognitoBackupError = json_err.into();
        assert!(matches!(err, CognitoBackupError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CognitoBackupError = toml_err.into();
        assert!(matches!(err, CognitoBackupError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
