//! AWS Cognito implementation of [`IdentityDirectory`]

use super::models::{group_fields, group_to_record, record_attributes, user_to_record};
use crate::adapters::directory::{IdentityDirectory, PoolListing};
use crate::config::{AwsConfig, SecretString};
use crate::domain::{DirectoryError, Page, PageCursor, Record, Result, UserPoolId};
use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_cognitoidentityprovider::types::{DeliveryMediumType, MessageActionType};
use aws_sdk_cognitoidentityprovider::Client;
use secrecy::ExposeSecret;

/// Page size for user, group and membership listings (service maximum)
const LIST_PAGE_LIMIT: i32 = 60;

/// Cognito user pool client
#[derive(Debug, Clone)]
pub struct CognitoDirectory {
    client: Client,
}

impl CognitoDirectory {
    /// Builds a client from the standard AWS provider chain
    ///
    /// `region` and `profile` from config take precedence over the environment.
    pub async fn new(config: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;

        tracing::debug!(
            region = ?sdk_config.region().map(|r| r.as_ref().to_string()),
            profile = ?config.profile,
            "Cognito client initialized"
        );

        Self {
            client: Client::new(&sdk_config),
        }
    }
}

/// Maps a service error code onto a [`DirectoryError`] variant
fn classify(operation: &str, code: Option<&str>, message: String) -> DirectoryError {
    let operation = operation.to_string();
    match code {
        Some("TooManyRequestsException") | Some("LimitExceededException") => {
            DirectoryError::Throttled { operation, message }
        }
        Some("UsernameExistsException")
        | Some("GroupExistsException")
        | Some("AliasExistsException") => DirectoryError::Conflict { operation, message },
        Some("ResourceNotFoundException") | Some("UserNotFoundException") => {
            DirectoryError::NotFound { operation, message }
        }
        _ => DirectoryError::Service { operation, message },
    }
}

fn sdk_error<E>(operation: &str, err: E) -> DirectoryError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = DisplayErrorContext(&err).to_string();
    classify(operation, err.code(), message)
}

fn required_str<'a>(record: &'a Record, field: &str) -> Result<&'a str> {
    record.get_str(field).ok_or_else(|| {
        DirectoryError::InvalidRecord(format!("{}: missing {}", record.display_key(), field))
            .into()
    })
}

#[async_trait]
impl IdentityDirectory for CognitoDirectory {
    async fn list_user_pools(&self, max_results: i32) -> Result<PoolListing> {
        let output = self
            .client
            .list_user_pools()
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| sdk_error("ListUserPools", e))?;

        let pool_ids = output
            .user_pools()
            .iter()
            .filter_map(|pool| pool.id())
            .map(|id| UserPoolId::new(id).map_err(DirectoryError::InvalidRecord))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(PoolListing {
            pool_ids,
            next_token: output.next_token().map(PageCursor::new),
        })
    }

    async fn list_users(&self, pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page> {
        let output = self
            .client
            .list_users()
            .user_pool_id(pool.as_str())
            .limit(LIST_PAGE_LIMIT)
            .set_pagination_token(cursor.map(PageCursor::into_inner))
            .send()
            .await
            .map_err(|e| sdk_error("ListUsers", e))?;

        Ok(Page::new(
            output.users().iter().map(user_to_record).collect(),
            output.pagination_token().map(PageCursor::new),
        ))
    }

    async fn list_groups(&self, pool: &UserPoolId, cursor: Option<PageCursor>) -> Result<Page> {
        let output = self
            .client
            .list_groups()
            .user_pool_id(pool.as_str())
            .limit(LIST_PAGE_LIMIT)
            .set_next_token(cursor.map(PageCursor::into_inner))
            .send()
            .await
            .map_err(|e| sdk_error("ListGroups", e))?;

        Ok(Page::new(
            output.groups().iter().map(group_to_record).collect(),
            output.next_token().map(PageCursor::new),
        ))
    }

    async fn admin_list_groups_for_user(
        &self,
        pool: &UserPoolId,
        username: &str,
    ) -> Result<Vec<String>> {
        let mut groups = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .admin_list_groups_for_user()
                .user_pool_id(pool.as_str())
                .username(username)
                .limit(LIST_PAGE_LIMIT)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| sdk_error("AdminListGroupsForUser", e))?;

            groups.extend(
                output
                    .groups()
                    .iter()
                    .filter_map(|g| g.group_name())
                    .map(str::to_string),
            );

            match output.next_token() {
                Some(token) => next_token = Some(token.to_string()),
                None => break,
            }
        }

        Ok(groups)
    }

    async fn admin_create_user(
        &self,
        pool: &UserPoolId,
        user: &Record,
        temporary_password: &SecretString,
    ) -> Result<Record> {
        let username = required_str(user, crate::domain::USERNAME_FIELD)?;
        let attributes = record_attributes(user)?;

        let output = self
            .client
            .admin_create_user()
            .user_pool_id(pool.as_str())
            .username(username)
            .set_user_attributes(Some(attributes))
            .temporary_password(temporary_password.expose_secret().as_str())
            .message_action(MessageActionType::Suppress)
            .desired_delivery_mediums(DeliveryMediumType::Email)
            .force_alias_creation(false)
            .send()
            .await
            .map_err(|e| sdk_error("AdminCreateUser", e))?;

        Ok(output.user().map(user_to_record).unwrap_or_else(|| user.clone()))
    }

    async fn admin_add_user_to_group(
        &self,
        pool: &UserPoolId,
        username: &str,
        group_name: &str,
    ) -> Result<()> {
        self.client
            .admin_add_user_to_group()
            .user_pool_id(pool.as_str())
            .username(username)
            .group_name(group_name)
            .send()
            .await
            .map_err(|e| sdk_error("AdminAddUserToGroup", e))?;
        Ok(())
    }

    async fn create_group(&self, pool: &UserPoolId, group: &Record) -> Result<Record> {
        let group_name = required_str(group, crate::domain::GROUP_NAME_FIELD)?;
        let (description, role_arn, precedence) = group_fields(group);

        let output = self
            .client
            .create_group()
            .user_pool_id(pool.as_str())
            .group_name(group_name)
            .set_description(description)
            .set_role_arn(role_arn)
            .set_precedence(precedence)
            .send()
            .await
            .map_err(|e| sdk_error("CreateGroup", e))?;

        Ok(output
            .group()
            .map(group_to_record)
            .unwrap_or_else(|| group.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_throttling() {
        let err = classify("AdminCreateUser", Some("TooManyRequestsException"), "x".into());
        assert!(matches!(err, DirectoryError::Throttled { .. }));
    }

    #[test]
    fn test_classify_conflicts() {
        for code in ["UsernameExistsException", "GroupExistsException", "AliasExistsException"] {
            let err = classify("CreateGroup", Some(code), "exists".into());
            assert!(matches!(err, DirectoryError::Conflict { .. }), "{code}");
        }
    }

    #[test]
    fn test_classify_not_found_and_fallback() {
        let err = classify("ListUsers", Some("ResourceNotFoundException"), "no pool".into());
        assert!(matches!(err, DirectoryError::NotFound { .. }));

        let err = classify("ListUsers", None, "dispatch failure".into());
        assert_eq!(err.to_string(), "ListUsers failed: dispatch failure");
    }

    #[test]
    fn test_required_str() {
        let record = Record::try_from(serde_json::json!({"Username": "carol"})).unwrap();
        assert_eq!(required_str(&record, "Username").unwrap(), "carol");
        assert!(required_str(&record, "GroupName").is_err());
    }
}
