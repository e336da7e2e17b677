//! Core business logic for cognito-backup.
//!
//! # Modules
//!
//! - [`export`] - Paginated export of users and groups into JSON backup files
//! - [`restore`] - Rate-limited replay of backup files into a user pool
//!
//! # Backup and restore workflow
//!
//! 1. **Back up groups**: `backup-groups` lists every group of the pool
//! 2. **Back up users**: `backup-users --with-groups` lists every user and
//!    attaches its group memberships
//! 3. **Restore groups** into the new pool
//! 4. **Restore users**: each user is created, then re-added to its groups
//!
//! # Example
//!
//! ```rust,no_run
//! use cognito_backup::adapters::cognito::CognitoDirectory;
//! use cognito_backup::config::AwsConfig;
//! use cognito_backup::core::export::{BackupCoordinator, ExportOptions};
//! use cognito_backup::domain::UserPoolId;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = Arc::new(CognitoDirectory::new(&AwsConfig::default()).await);
//! let coordinator = BackupCoordinator::new(directory, ExportOptions::default());
//!
//! let pool = UserPoolId::new("eu-west-1_AbCdEf123")?;
//! let summary = coordinator
//!     .backup_users(&pool, Path::new("users.json"), true)
//!     .await?;
//!
//! println!("Exported {} users", summary.records);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod restore;
