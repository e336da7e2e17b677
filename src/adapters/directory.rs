//! Identity directory trait definition
//!
//! `IdentityDirectory` is the remote user pool API as the rest of the crate
//! sees it: listing calls that hand back opaque continuation cursors, and the
//! admin create calls used by restore. The Cognito adapter implements it
//! against AWS; tests implement it in memory.

use crate::config::SecretString;
use crate::domain::{Page, PageCursor, Record, Result, UserPoolId};
use async_trait::async_trait;

/// Most user pools a single `ListUserPools` call may return
pub const MAX_POOLS_PER_PAGE: i32 = 60;

/// Result of one `ListUserPools` call
#[derive(Debug, Clone, Default)]
pub struct PoolListing {
    /// Pools on this page
    pub pool_ids: Vec<UserPoolId>,

    /// Continuation token, if the service has more pools
    pub next_token: Option<PageCursor>,
}

/// Trait for user pool directory implementations
///
/// # Example
///
/// ```no_run
/// use cognito_backup::adapters::directory::IdentityDirectory;
/// use cognito_backup::domain::UserPoolId;
///
/// # async fn example(directory: &dyn IdentityDirectory) -> cognito_backup::domain::Result<()> {
/// let pool = UserPoolId::new("eu-west-1_abc").unwrap();
/// let mut cursor = None;
/// loop {
///     let page = directory.list_users(&pool, cursor).await?;
///     println!("{} users", page.records.len());
///     match page.next_cursor {
///         Some(next) => cursor = Some(next),
///         None => break,
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Lists user pools in the account, at most `max_results` per call
    async fn list_user_pools(&self, max_results: i32) -> Result<PoolListing>;

    /// Fetches one page of users; `None` requests the first page
    async fn list_users(&self, pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page>;

    /// Fetches one page of groups; `None` requests the first page
    async fn list_groups(&self, pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page>;

    /// Names of every group the user belongs to
    ///
    /// Implementations follow the service's own continuation internally.
    async fn admin_list_groups_for_user(
        &self,
        pool: &UserPoolId,
        username: &str,
    ) -> Result<Vec<String>>;

    /// Creates a user from an exported record
    ///
    /// The record has already been stripped of server-assigned fields.
    /// Returns the user as the service reports it after creation.
    async fn admin_create_user(
        &self,
        pool: &UserPoolId,
        user: &Record,
        temporary_password: &SecretString,
    ) -> Result<Record>;

    /// Adds an existing user to an existing group
    async fn admin_add_user_to_group(
        &self,
        pool: &UserPoolId,
        username: &str,
        group_name: &str,
    ) -> Result<()>;

    /// Creates a group from an exported record
    async fn create_group(&self, pool: &UserPoolId, group: &Record) -> Result<Record>;
}
