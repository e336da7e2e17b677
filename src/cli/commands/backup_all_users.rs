//! `backup-all-users` command implementation

use super::{connect, validated};
use crate::config::BackupConfig;
use crate::core::export::{BackupCoordinator, ExportOptions};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the backup-all-users command
#[derive(Args, Debug)]
pub struct BackupAllUsersArgs {
    /// Directory receiving one `<pool>.json` per user pool
    #[arg(short, long, default_value = "backups")]
    pub directory: PathBuf,

    /// Group lookups in flight per page (overrides export.concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Attach each user's group memberships
    #[arg(long)]
    pub with_groups: bool,
}

impl BackupAllUsersArgs {
    /// Execute the backup-all-users command
    pub async fn execute(&self, config: &BackupConfig) -> anyhow::Result<i32> {
        let config = self.effective_config(config)?;
        let with_groups = config.export.include_group_memberships;
        let options = ExportOptions::new(config.export.concurrency);

        println!(
            "📦 Backing up every user pool into {}",
            self.directory.display()
        );

        let coordinator = BackupCoordinator::new(connect(&config).await, options);
        let account = coordinator
            .backup_all_users(&self.directory, with_groups)
            .await?;

        for pool in &account.pools {
            println!(
                "   {} → {} ({} users)",
                pool.pool_id,
                pool.path.display(),
                pool.summary.records
            );
        }
        println!(
            "✅ {} pools, {} users backed up in {:.1}s",
            account.pools.len(),
            account.total_records(),
            account.duration.as_secs_f64()
        );
        Ok(0)
    }

    fn effective_config(&self, config: &BackupConfig) -> anyhow::Result<BackupConfig> {
        let mut config = config.clone();
        if let Some(concurrency) = self.concurrency {
            tracing::info!(concurrency, "Overriding export concurrency from CLI");
            config.export.concurrency = concurrency;
        }
        if self.with_groups {
            config.export.include_group_memberships = true;
        }
        validated(config)
    }
}
