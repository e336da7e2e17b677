//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cognito-backup using clap.

pub mod commands;

use crate::config::BackupConfig;
use clap::{Parser, Subcommand};

/// cognito-backup - Cognito user pool backup and restore
#[derive(Parser, Debug)]
#[command(name = "cognito-backup")]
#[command(version, about, long_about = None)]
#[command(author = "Cognito Backup Contributors")]
pub struct Cli {
    /// Path to configuration file (optional; defaults apply without one)
    #[arg(short, long, env = "COGNITO_BACKUP_CONFIG", global = true)]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COGNITO_BACKUP_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// AWS region of the user pool
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// AWS shared-config profile to authenticate with
    #[arg(long, env = "AWS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Print the full error chain on failure
    #[arg(long, global = true)]
    pub stacktrace: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Applies global flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut BackupConfig) {
        if let Some(region) = &self.region {
            config.aws.region = Some(region.clone());
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.log_level = level.to_lowercase();
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Back up every user of a pool to a JSON file
    BackupUsers(commands::backup_users::BackupUsersArgs),

    /// Back up every group of a pool to a JSON file
    BackupGroups(commands::backup_groups::BackupGroupsArgs),

    /// Back up the users of every pool in the account, one file per pool
    BackupAllUsers(commands::backup_all_users::BackupAllUsersArgs),

    /// Recreate users from a backup file
    RestoreUsers(commands::restore_users::RestoreUsersArgs),

    /// Recreate groups from a backup file
    RestoreGroups(commands::restore_groups::RestoreGroupsArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
