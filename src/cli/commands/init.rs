//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cognito-backup.toml")]
    pub output: String,

    /// Include explanatory comments for every setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing cognito-backup configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(1);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        fs::write(&self.output, config_content)?;

        println!("✅ Configuration file created: {}", self.output);
        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your region and profile", self.output);
        println!("  2. Export COGNITO_TEMP_PASSWORD for restores (or pass --password)");
        println!(
            "  3. Back up: cognito-backup --config {} backup-users --user-pool-id <id> --with-groups",
            self.output
        );
        println!();
        Ok(0)
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# cognito-backup configuration

[aws]
# region = "eu-west-1"
# profile = "default"

[export]
concurrency = 5
include_group_memberships = false

[restore]
delay_ms = 200
concurrency = 1
group_concurrency = 1
# temporary_password = "${COGNITO_TEMP_PASSWORD}"

[logging]
log_level = "info"
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# cognito-backup configuration
#
# Every setting is optional. Values can reference environment variables as
# ${VAR}, and any setting can be overridden with
# COGNITO_BACKUP_<SECTION>_<KEY>, e.g. COGNITO_BACKUP_RESTORE_DELAY_MS=500.
# Command-line flags take precedence over both.

# ============================================================================
# AWS
# ============================================================================
[aws]
# Region of the user pools. Falls back to AWS_REGION and the shared config.
# region = "eu-west-1"

# Named profile from ~/.aws/credentials. Falls back to AWS_PROFILE.
# profile = "default"

# ============================================================================
# Backup
# ============================================================================
[export]
# Group-membership lookups in flight per listing page (1-100)
concurrency = 5

# Attach each user's groups as a "Groups" array (same as --with-groups)
include_group_memberships = false

# ============================================================================
# Restore
# ============================================================================
[restore]
# Minimum milliseconds between any two calls to the pool, shared by all
# concurrent tasks. 0 disables pacing.
delay_ms = 200

# Users or groups created concurrently (1-50)
concurrency = 1

# Group-membership adds in flight per restored user (1-10)
group_concurrency = 1

# Temporary password assigned to every restored user. Users must change it
# at first sign-in. Prefer an environment variable over a literal value.
# temporary_password = "${COGNITO_TEMP_PASSWORD}"

# ============================================================================
# Logging
# ============================================================================
[logging]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Write JSON logs to local_path in addition to the console
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily or hourly)
local_rotation = "daily"
"#
        .to_string()
    }
}
