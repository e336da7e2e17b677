//! `restore-users` command implementation

use super::{confirm, connect, finish_restore, parse_secret, throttle_for, validated};
use crate::config::{BackupConfig, SecretString};
use crate::core::restore::{RestoreCoordinator, RestoreOptions};
use crate::domain::UserPoolId;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the restore-users command
#[derive(Args, Debug)]
pub struct RestoreUsersArgs {
    /// User pool to restore into
    #[arg(short, long)]
    pub user_pool_id: UserPoolId,

    /// Backup file produced by backup-users
    #[arg(short, long)]
    pub file: PathBuf,

    /// Temporary password given to every restored user
    #[arg(long, env = "COGNITO_BACKUP_TEMP_PASSWORD", value_parser = parse_secret, hide_env_values = true)]
    pub password: Option<SecretString>,

    /// Minimum milliseconds between calls (overrides restore.delay_ms)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Users created concurrently (overrides restore.concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Group adds in flight per user (overrides restore.group_concurrency)
    #[arg(long)]
    pub group_concurrency: Option<usize>,

    /// Exit 0 even when some users could not be restored
    #[arg(long)]
    pub allow_failures: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl RestoreUsersArgs {
    /// Execute the restore-users command
    pub async fn execute(&self, config: &BackupConfig) -> anyhow::Result<i32> {
        let config = self.effective_config(config)?;
        let password = config
            .restore
            .temporary_password
            .clone()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "A temporary password is required: pass --password, set \
                     COGNITO_BACKUP_TEMP_PASSWORD or restore.temporary_password"
                )
            })?;

        let options = RestoreOptions::new(
            config.restore.concurrency,
            config.restore.group_concurrency,
        );

        if !self.yes {
            println!("Restore Configuration:");
            println!("  Pool: {}", self.user_pool_id);
            println!("  File: {}", self.file.display());
            println!("  Delay: {}ms", config.restore.delay_ms);
            println!("  Concurrency: {}", options.concurrency);
            println!();
            if !confirm("Create these users in the pool?")? {
                println!("Restore cancelled.");
                return Ok(0);
            }
        }

        println!("🚀 Restoring users into {}", self.user_pool_id);

        let coordinator = RestoreCoordinator::new(
            connect(&config).await,
            options,
            throttle_for(config.restore.min_interval()),
        );
        let report = coordinator
            .restore_users(&self.user_pool_id, &self.file, password)
            .await?;

        Ok(finish_restore("User", &report, self.allow_failures))
    }

    /// Applies the command-line overrides onto `config` and validates the result
    fn effective_config(&self, config: &BackupConfig) -> anyhow::Result<BackupConfig> {
        let mut config = config.clone();
        if let Some(password) = &self.password {
            config.restore.temporary_password = Some(password.clone());
        }
        if let Some(delay_ms) = self.delay_ms {
            tracing::info!(delay_ms, "Overriding restore delay from CLI");
            config.restore.delay_ms = delay_ms;
        }
        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding restore concurrency from CLI");
            config.restore.concurrency = concurrency;
        }
        if let Some(group_concurrency) = self.group_concurrency {
            tracing::info!(group_concurrency, "Overriding group concurrency from CLI");
            config.restore.group_concurrency = group_concurrency;
        }
        validated(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;
    use std::time::Duration;
    use test_case::test_case;

    fn args() -> RestoreUsersArgs {
        RestoreUsersArgs {
            user_pool_id: UserPoolId::new("eu-west-1_abc").unwrap(),
            file: PathBuf::from("users.json"),
            password: None,
            delay_ms: None,
            concurrency: None,
            group_concurrency: None,
            allow_failures: false,
            yes: true,
        }
    }

    #[test_case(Some(10_000), None, "restore.concurrency" ; "concurrency too high")]
    #[test_case(Some(0), None, "restore.concurrency" ; "concurrency zero")]
    #[test_case(None, Some(11), "restore.group_concurrency" ; "group concurrency too high")]
    fn test_overrides_are_validated(
        concurrency: Option<usize>,
        group_concurrency: Option<usize>,
        field: &str,
    ) {
        let args = RestoreUsersArgs {
            concurrency,
            group_concurrency,
            ..args()
        };
        let err = args
            .effective_config(&BackupConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains(field), "{err}");
    }

    #[test]
    fn test_overrides_applied() {
        let args = RestoreUsersArgs {
            password: Some(secret_string("Cli#Passw0rd".to_string())),
            delay_ms: Some(750),
            concurrency: Some(4),
            group_concurrency: Some(2),
            ..args()
        };
        let mut base = BackupConfig::default();
        base.restore.temporary_password = Some(secret_string("File#Passw0rd".to_string()));

        let config = args.effective_config(&base).unwrap();
        assert_eq!(config.restore.min_interval(), Duration::from_millis(750));
        assert_eq!(config.restore.concurrency, 4);
        assert_eq!(config.restore.group_concurrency, 2);
        assert_eq!(
            config
                .restore
                .temporary_password
                .as_ref()
                .unwrap()
                .expose_secret(),
            "Cli#Passw0rd"
        );
    }
}
