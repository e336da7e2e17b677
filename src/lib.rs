// cognito-backup - AWS Cognito user pool backup and restore
// Copyright (c) 2025 Cognito Backup Contributors
// Licensed under the MIT License

//! # cognito-backup
//!
//! Backup and restore for AWS Cognito user pools. The service has no native
//! export, so this crate walks the paginated listing APIs into JSON files and
//! replays those files through the admin create APIs.
//!
//! ## Overview
//!
//! - **Backing up** users (optionally with their group memberships) and groups
//!   of one pool, or the users of every pool in the account
//! - **Restoring** users and groups into a pool at a controlled call rate,
//!   with per-record failure reporting
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (paginated export, rate-limited restore)
//! - [`adapters`] - External integrations (AWS Cognito)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cognito_backup::adapters::cognito::CognitoDirectory;
//! use cognito_backup::config::{load_default_config, secret_string};
//! use cognito_backup::core::restore::{IntervalThrottle, RestoreCoordinator, RestoreOptions};
//! use cognito_backup::domain::UserPoolId;
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_default_config()?;
//!     let directory = Arc::new(CognitoDirectory::new(&config.aws).await);
//!
//!     let coordinator = RestoreCoordinator::new(
//!         directory,
//!         RestoreOptions::default(),
//!         Arc::new(IntervalThrottle::new(Duration::from_millis(200))),
//!     );
//!
//!     let pool = UserPoolId::new("eu-west-1_AbCdEf123")?;
//!     let report = coordinator
//!         .restore_users(&pool, Path::new("users.json"), secret_string("Temp#Passw0rd".into()))
//!         .await?;
//!
//!     println!("Restored {} of {} users", report.succeeded(), report.total());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::CognitoBackupError`]; a restore only
//! fails as a whole when its input cannot be loaded. Individual record
//! failures are collected in the [`core::restore::RestoreReport`].
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate, to stderr so command output on
//! stdout stays clean:
//!
//! ```rust,no_run
//! tracing::info!(pool_id = "eu-west-1_AbCdEf123", "Backup started");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
