//! In-memory identity directory shared by the pipeline tests

#![allow(dead_code)]

use async_trait::async_trait;
use cognito_backup::adapters::directory::{IdentityDirectory, PoolListing};
use cognito_backup::config::SecretString;
use cognito_backup::domain::{
    CognitoBackupError, DirectoryError, Page, PageCursor, Record, Result, UserPoolId,
};
use secrecy::ExposeSecret;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// One remote call as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListUsers(Option<String>),
    ListGroups(Option<String>),
    ListGroupsForUser(String),
    CreateUser { username: String, password: String },
    AddToGroup { username: String, group: String },
    CreateGroup(String),
}

#[derive(Default)]
pub struct MockDirectory {
    pub pools: Vec<UserPoolId>,
    pub more_pools: bool,
    /// User pages per pool; page `n` is reached with cursor `p<n>`
    pub user_pages: HashMap<String, Vec<Vec<Record>>>,
    pub group_pages: Vec<Vec<Record>>,
    pub memberships: HashMap<String, Vec<String>>,
    /// Cursor whose page request fails
    pub failing_cursor: Option<String>,
    /// User whose group lookup fails
    pub failing_membership: Option<String>,
    pub existing_users: Vec<String>,
    pub missing_groups: Vec<String>,
    pub calls: Mutex<Vec<Call>>,
}

impl MockDirectory {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn page(&self, pages: &[Vec<Record>], cursor: Option<PageCursor>) -> Result<Page> {
        if let (Some(cursor), Some(failing)) = (&cursor, &self.failing_cursor) {
            if cursor.as_str() == failing.as_str() {
                return Err(DirectoryError::service("ListUsers", "internal error").into());
            }
        }

        let index = match &cursor {
            None => 0,
            Some(c) => c.as_str()[1..].parse::<usize>().unwrap(),
        };
        let next = (index + 1 < pages.len()).then(|| PageCursor::new(format!("p{}", index + 1)));
        Ok(Page::new(pages.get(index).cloned().unwrap_or_default(), next))
    }
}

pub fn user(name: &str) -> Record {
    Record::try_from(json!({
        "Username": name,
        "Attributes": [
            {"Name": "sub", "Value": format!("sub-{name}")},
            {"Name": "email", "Value": format!("{name}@example.com")}
        ],
        "Enabled": true,
        "UserStatus": "CONFIRMED"
    }))
    .unwrap()
}

pub fn group(name: &str) -> Record {
    Record::try_from(json!({ "GroupName": name, "Precedence": 1 })).unwrap()
}

#[async_trait]
impl IdentityDirectory for MockDirectory {
    async fn list_user_pools(&self, _max_results: i32) -> Result<PoolListing> {
        Ok(PoolListing {
            pool_ids: self.pools.clone(),
            next_token: self.more_pools.then(|| PageCursor::new("more")),
        })
    }

    async fn list_users(&self, pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page> {
        self.record(Call::ListUsers(cursor.as_ref().map(|c| c.to_string())));
        let pages = self.user_pages.get(pool.as_str()).ok_or_else(|| {
            CognitoBackupError::from(DirectoryError::NotFound {
                operation: "ListUsers".to_string(),
                message: pool.to_string(),
            })
        })?;
        self.page(pages, cursor)
    }

    async fn list_groups(&self, _pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page> {
        self.record(Call::ListGroups(cursor.as_ref().map(|c| c.to_string())));
        self.page(&self.group_pages, cursor)
    }

    async fn admin_list_groups_for_user(
        &self,
        _pool: &UserPoolId,
        username: &str,
    ) -> Result<Vec<String>> {
        self.record(Call::ListGroupsForUser(username.to_string()));
        if self.failing_membership.as_deref() == Some(username) {
            return Err(DirectoryError::Throttled {
                operation: "AdminListGroupsForUser".to_string(),
                message: "Rate exceeded".to_string(),
            }
            .into());
        }
        Ok(self.memberships.get(username).cloned().unwrap_or_default())
    }

    async fn admin_create_user(
        &self,
        _pool: &UserPoolId,
        user: &Record,
        temporary_password: &SecretString,
    ) -> Result<Record> {
        let username = user.username().unwrap_or_default().to_string();
        self.record(Call::CreateUser {
            username: username.clone(),
            password: temporary_password.expose_secret().as_str().to_string(),
        });

        if user.attribute("sub").is_some() {
            return Err(DirectoryError::service("AdminCreateUser", "sub is read-only").into());
        }
        if self.existing_users.contains(&username) {
            return Err(DirectoryError::Conflict {
                operation: "AdminCreateUser".to_string(),
                message: "User account already exists".to_string(),
            }
            .into());
        }
        Ok(user.clone())
    }

    async fn admin_add_user_to_group(
        &self,
        _pool: &UserPoolId,
        username: &str,
        group_name: &str,
    ) -> Result<()> {
        self.record(Call::AddToGroup {
            username: username.to_string(),
            group: group_name.to_string(),
        });
        if self.missing_groups.iter().any(|g| g == group_name) {
            return Err(DirectoryError::NotFound {
                operation: "AdminAddUserToGroup".to_string(),
                message: format!("Group {group_name} not found"),
            }
            .into());
        }
        Ok(())
    }

    async fn create_group(&self, _pool: &UserPoolId, group: &Record) -> Result<Record> {
        self.record(Call::CreateGroup(
            group.group_name().unwrap_or_default().to_string(),
        ));
        Ok(group.clone())
    }
}
