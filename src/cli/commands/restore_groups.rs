//! `restore-groups` command implementation

use super::{confirm, connect, finish_restore, throttle_for, validated};
use crate::config::BackupConfig;
use crate::core::restore::{RestoreCoordinator, RestoreOptions, DEFAULT_GROUP_CONCURRENCY};
use crate::domain::UserPoolId;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the restore-groups command
#[derive(Args, Debug)]
pub struct RestoreGroupsArgs {
    /// User pool to restore into
    #[arg(short, long)]
    pub user_pool_id: UserPoolId,

    /// Backup file produced by backup-groups
    #[arg(short, long)]
    pub file: PathBuf,

    /// Minimum milliseconds between calls (overrides restore.delay_ms)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Groups created concurrently (overrides restore.concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Exit 0 even when some groups could not be restored
    #[arg(long)]
    pub allow_failures: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl RestoreGroupsArgs {
    /// Execute the restore-groups command
    pub async fn execute(&self, config: &BackupConfig) -> anyhow::Result<i32> {
        let config = self.effective_config(config)?;
        let options = RestoreOptions::new(config.restore.concurrency, DEFAULT_GROUP_CONCURRENCY);

        if !self.yes {
            println!("Restore Configuration:");
            println!("  Pool: {}", self.user_pool_id);
            println!("  File: {}", self.file.display());
            println!("  Delay: {}ms", config.restore.delay_ms);
            println!();
            if !confirm("Create these groups in the pool?")? {
                println!("Restore cancelled.");
                return Ok(0);
            }
        }

        println!("🚀 Restoring groups into {}", self.user_pool_id);

        let coordinator = RestoreCoordinator::new(
            connect(&config).await,
            options,
            throttle_for(config.restore.min_interval()),
        );
        let report = coordinator
            .restore_groups(&self.user_pool_id, &self.file)
            .await?;

        Ok(finish_restore("Group", &report, self.allow_failures))
    }

    fn effective_config(&self, config: &BackupConfig) -> anyhow::Result<BackupConfig> {
        let mut config = config.clone();
        if let Some(delay_ms) = self.delay_ms {
            tracing::info!(delay_ms, "Overriding restore delay from CLI");
            config.restore.delay_ms = delay_ms;
        }
        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding restore concurrency from CLI");
            config.restore.concurrency = concurrency;
        }
        validated(config)
    }
}
