//! External system integrations for cognito-backup.
//!
//! - [`directory`] - the `IdentityDirectory` trait: the remote user pool API
//! - [`cognito`] - AWS Cognito implementation of that trait
//!
//! # Design Pattern
//!
//! The core export and restore pipelines only ever see `IdentityDirectory`,
//! so tests drive them with in-memory implementations.
//!
//! ```rust,no_run
//! use cognito_backup::adapters::cognito::CognitoDirectory;
//! use cognito_backup::adapters::directory::IdentityDirectory;
//! use cognito_backup::config::AwsConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AwsConfig {
//!     region: Some("eu-west-1".to_string()),
//!     profile: None,
//! };
//! let directory = CognitoDirectory::new(&config).await;
//! let pools = directory.list_user_pools(60).await?;
//! println!("{} pools", pools.pool_ids.len());
//! # Ok(())
//! # }
//! ```

pub mod cognito;
pub mod directory;
