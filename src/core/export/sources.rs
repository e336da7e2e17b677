//! Page sources and enrichers backed by an [`IdentityDirectory`]

use super::exporter::{PageSource, RecordEnricher};
use crate::adapters::directory::{IdentityDirectory, MAX_POOLS_PER_PAGE};
use crate::domain::{
    DirectoryError, Page, PageCursor, Record, Result, UserPoolId, GROUPS_FIELD,
};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// `ListUsers` as a page source
pub struct UserPages {
    directory: Arc<dyn IdentityDirectory>,
    pool: UserPoolId,
}

impl UserPages {
    pub fn new(directory: Arc<dyn IdentityDirectory>, pool: UserPoolId) -> Self {
        Self { directory, pool }
    }
}

#[async_trait]
impl PageSource for UserPages {
    async fn fetch_page(&self, cursor: Option<PageCursor>) -> Result<Page> {
        self.directory.list_users(&self.pool, cursor).await
    }
}

/// `ListGroups` as a page source
pub struct GroupPages {
    directory: Arc<dyn IdentityDirectory>,
    pool: UserPoolId,
}

impl GroupPages {
    pub fn new(directory: Arc<dyn IdentityDirectory>, pool: UserPoolId) -> Self {
        Self { directory, pool }
    }
}

#[async_trait]
impl PageSource for GroupPages {
    async fn fetch_page(&self, cursor: Option<PageCursor>) -> Result<Page> {
        self.directory.list_groups(&self.pool, cursor).await
    }
}

/// Attaches each user's group names as `Groups`
pub struct GroupMembershipEnricher {
    directory: Arc<dyn IdentityDirectory>,
    pool: UserPoolId,
}

impl GroupMembershipEnricher {
    pub fn new(directory: Arc<dyn IdentityDirectory>, pool: UserPoolId) -> Self {
        Self { directory, pool }
    }
}

#[async_trait]
impl RecordEnricher for GroupMembershipEnricher {
    async fn enrich(&self, record: &Record) -> Result<Map<String, Value>> {
        let username = record.username().ok_or_else(|| {
            DirectoryError::InvalidRecord("listed user has no Username".to_string())
        })?;

        let groups = self
            .directory
            .admin_list_groups_for_user(&self.pool, username)
            .await?;

        let mut fields = Map::new();
        fields.insert(
            GROUPS_FIELD.to_string(),
            Value::Array(groups.into_iter().map(Value::String).collect()),
        );
        Ok(fields)
    }
}

/// Lists every user pool in the account
///
/// Only a single listing page is supported: if the service reports a
/// continuation token the account holds more pools than one page and this
/// fails with [`DirectoryError::TooManyPools`] instead of truncating.
pub async fn enumerate_user_pools(directory: &dyn IdentityDirectory) -> Result<Vec<UserPoolId>> {
    let listing = directory.list_user_pools(MAX_POOLS_PER_PAGE).await?;

    if listing.next_token.is_some() {
        return Err(DirectoryError::TooManyPools {
            max: MAX_POOLS_PER_PAGE,
        }
        .into());
    }

    tracing::info!(count = listing.pool_ids.len(), "Enumerated user pools");
    Ok(listing.pool_ids)
}
