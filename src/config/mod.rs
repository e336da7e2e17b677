//! Configuration management for cognito-backup.
//!
//! Configuration is optional: every value has a default, a TOML file can
//! override any of them, `COGNITO_BACKUP_<SECTION>_<KEY>` environment
//! variables override the file, and command-line flags override everything.
//!
//! # Configuration Structure
//!
//! - [`AwsConfig`] - region and named profile
//! - [`ExportConfig`] - enrichment concurrency, group memberships
//! - [`RestoreConfig`] - call interval, concurrency, temporary password
//! - [`LoggingConfig`] - log level and optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [aws]
//! region = "eu-west-1"
//! profile = "backup"
//!
//! [export]
//! concurrency = 5
//! include_group_memberships = true
//!
//! [restore]
//! delay_ms = 200
//! temporary_password = "${COGNITO_TEMP_PASSWORD}"
//! ```
//!
//! `${VAR_NAME}` placeholders are substituted from the environment before parsing.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, load_default_config};
pub use schema::{AwsConfig, BackupConfig, ExportConfig, LoggingConfig, RestoreConfig};
pub use secret::{secret_string, SecretString, SecretValue};
