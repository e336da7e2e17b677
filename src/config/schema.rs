//! Configuration schema types
//!
//! Every section and field has a default, so an empty file (or no file at all)
//! is a valid configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration structure that maps to the TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupConfig {
    /// AWS connection settings
    #[serde(default)]
    pub aws: AwsConfig,

    /// Export (backup) settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Restore settings
    #[serde(default)]
    pub restore: RestoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BackupConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.aws.validate()?;
        self.export.validate()?;
        self.restore.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// AWS connection settings
///
/// Both fields fall back to the standard AWS provider chain when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region, e.g. `eu-west-1`
    #[serde(default)]
    pub region: Option<String>,

    /// Named profile from the shared credentials file
    #[serde(default)]
    pub profile: Option<String>,
}

impl AwsConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(region) = &self.region {
            if region.trim().is_empty() {
                return Err("aws.region cannot be empty when set".to_string());
            }
        }
        if let Some(profile) = &self.profile {
            if profile.trim().is_empty() {
                return Err("aws.profile cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Enrichment calls allowed in flight within one page
    #[serde(default = "default_export_concurrency")]
    pub concurrency: usize,

    /// Attach each user's group memberships as a `Groups` field
    #[serde(default)]
    pub include_group_memberships: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 || self.concurrency > 100 {
            return Err(format!(
                "export.concurrency must be between 1 and 100, got {}",
                self.concurrency
            ));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            concurrency: default_export_concurrency(),
            include_group_memberships: false,
        }
    }
}

/// Restore configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreConfig {
    /// Minimum interval between remote calls in milliseconds (0 disables)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Create calls allowed in flight
    #[serde(default = "default_restore_concurrency")]
    pub concurrency: usize,

    /// Group-add calls allowed in flight per user
    #[serde(default = "default_group_concurrency")]
    pub group_concurrency: usize,

    /// Temporary password applied to every restored user
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub temporary_password: Option<SecretString>,
}

impl RestoreConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.concurrency == 0 || self.concurrency > 50 {
            return Err(format!(
                "restore.concurrency must be between 1 and 50, got {}",
                self.concurrency
            ));
        }

        if self.group_concurrency == 0 || self.group_concurrency > 10 {
            return Err(format!(
                "restore.group_concurrency must be between 1 and 10, got {}",
                self.group_concurrency
            ));
        }

        if self
            .temporary_password
            .as_ref()
            .map(|p| p.expose_secret().is_empty())
            .unwrap_or(false)
        {
            return Err("restore.temporary_password cannot be empty when set".to_string());
        }

        Ok(())
    }

    /// The configured minimum interval between calls
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            concurrency: default_restore_concurrency(),
            group_concurrency: default_group_concurrency(),
            temporary_password: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid logging.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_export_concurrency() -> usize {
    5
}

fn default_delay_ms() -> u64 {
    200
}

fn default_restore_concurrency() -> usize {
    1
}

fn default_group_concurrency() -> usize {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
