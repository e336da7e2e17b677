//! `backup-users` command implementation

use super::{connect, validated};
use crate::config::BackupConfig;
use crate::core::export::{BackupCoordinator, ExportOptions};
use crate::domain::UserPoolId;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the backup-users command
#[derive(Args, Debug)]
pub struct BackupUsersArgs {
    /// User pool to back up
    #[arg(short, long)]
    pub user_pool_id: UserPoolId,

    /// Output file (default: `<pool>.json`)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Group lookups in flight per page (overrides export.concurrency)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Attach each user's group memberships
    #[arg(long)]
    pub with_groups: bool,
}

impl BackupUsersArgs {
    /// Execute the backup-users command
    pub async fn execute(&self, config: &BackupConfig) -> anyhow::Result<i32> {
        let path = self
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.json", self.user_pool_id.file_stem())));
        let config = self.effective_config(config)?;
        let with_groups = config.export.include_group_memberships;
        let options = ExportOptions::new(config.export.concurrency);

        println!("📦 Backing up users of {}", self.user_pool_id);

        let coordinator = BackupCoordinator::new(connect(&config).await, options);
        let summary = coordinator
            .backup_users(&self.user_pool_id, &path, with_groups)
            .await?;

        println!(
            "✅ {} users written to {} ({} pages, {:.1}s)",
            summary.records,
            path.display(),
            summary.pages,
            summary.duration.as_secs_f64()
        );
        Ok(0)
    }

    /// Applies the command-line overrides onto `config` and validates the result
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
