//! Error context extension trait
//!
//! `anyhow::Context` for library code that keeps returning
//! [`CognitoBackupError`].
//!
//! ```rust
//! use cognito_backup::domain::context::ResultExt;
//! use cognito_backup::domain::Result;
//!
//! fn read_backup(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
//! }
//! # assert!(read_backup("/nonexistent/backup.json").is_err());
//! ```

use crate::domain::errors::CognitoBackupError;
use crate::domain::result::Result;

/// Adds a message in front of an error
pub trait ResultExt<T> {
    /// Prefixes the error with `context`
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Prefixes the error with a lazily built message
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<CognitoBackupError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| CognitoBackupError::Other(format!("{context}: {}", e.into())))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let base_error = e.into();
            CognitoBackupError::Other(format!("{}: {base_error}", f()))
        })
    }
}
