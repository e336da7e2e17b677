//! Domain models and types for cognito-backup.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Records** ([`Record`]) - opaque user/group objects as the service returns them
//! - **Pagination** ([`Page`], [`PageCursor`]) - one listing page and its continuation
//! - **Identifiers** ([`UserPoolId`])
//! - **Error types** ([`CognitoBackupError`], [`DirectoryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, CognitoBackupError>`]:
//!
//! ```rust
//! use cognito_backup::domain::{CognitoBackupError, Result, UserPoolId};
//!
//! fn parse_pool(raw: &str) -> Result<UserPoolId> {
//!     UserPoolId::new(raw).map_err(CognitoBackupError::Validation)
//! }
//! # assert!(parse_pool("").is_err());
//! ```

pub mod context;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CognitoBackupError, DirectoryError};
pub use ids::UserPoolId;
pub use record::{
    Page, PageCursor, Record, ATTRIBUTES_FIELD, GROUPS_FIELD, GROUP_NAME_FIELD,
    SERVER_ID_ATTRIBUTE, USERNAME_FIELD,
};
pub use result::Result;
