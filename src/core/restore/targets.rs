//! Restore destinations
//!
//! A [`RestoreTarget`] is the write side of a pool for one kind of record.
//! The restorer only sees this trait; which identity API is called, and with
//! which side-channel inputs, is the target's business.

use crate::adapters::directory::IdentityDirectory;
use crate::config::SecretString;
use crate::domain::{CognitoBackupError, DirectoryError, Record, Result, UserPoolId};
use async_trait::async_trait;
use std::sync::Arc;

/// Create and membership calls for one pool
#[async_trait]
pub trait RestoreTarget: Send + Sync {
    /// Creates the identity described by an already prepared record
    async fn create(&self, record: &Record) -> Result<Record>;

    /// Adds the identity created from `record` to `group`
    async fn add_to_group(&self, record: &Record, group: &str) -> Result<()>;
}

/// Restores users with a shared temporary password
pub struct UserRestoreTarget {
    directory: Arc<dyn IdentityDirectory>,
    pool: UserPoolId,
    temporary_password: SecretString,
}

impl UserRestoreTarget {
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        pool: UserPoolId,
        temporary_password: SecretString,
    ) -> Self {
        Self {
            directory,
            pool,
            temporary_password,
        }
    }
}

#[async_trait]
impl RestoreTarget for UserRestoreTarget {
    async fn create(&self, record: &Record) -> Result<Record> {
        self.directory
            .admin_create_user(&self.pool, record, &self.temporary_password)
            .await
    }

    async fn add_to_group(&self, record: &Record, group: &str) -> Result<()> {
        let username = record.username().ok_or_else(|| {
            DirectoryError::InvalidRecord(format!("{}: missing Username", record.display_key()))
        })?;
        self.directory
            .admin_add_user_to_group(&self.pool, username, group)
            .await
    }
}

/// Restores group definitions
pub struct GroupRestoreTarget {
    directory: Arc<dyn IdentityDirectory>,
    pool: UserPoolId,
}

impl GroupRestoreTarget {
    pub fn new(directory: Arc<dyn IdentityDirectory>, pool: UserPoolId) -> Self {
        Self { directory, pool }
    }
}

#[async_trait]
impl RestoreTarget for GroupRestoreTarget {
    async fn create(&self, record: &Record) -> Result<Record> {
        self.directory.create_group(&self.pool, record).await
    }

    async fn add_to_group(&self, record: &Record, group: &str) -> Result<()> {
        Err(CognitoBackupError::Restore(format!(
            "group {} cannot be added to group {group}",
            record.display_key()
        )))
    }
}
