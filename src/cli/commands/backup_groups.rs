//! `backup-groups` command implementation

use super::connect;
use crate::config::BackupConfig;
use crate::core::export::{BackupCoordinator, ExportOptions};
use crate::domain::UserPoolId;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the backup-groups command
#[derive(Args, Debug)]
pub struct BackupGroupsArgs {
    /// User pool to back up
    #[arg(short, long)]
    pub user_pool_id: UserPoolId,

    /// Output file (default: `<pool>-groups.json`)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl BackupGroupsArgs {
    /// Execute the backup-groups command
    pub async fn execute(&self, config: &BackupConfig) -> anyhow::Result<i32> {
        let path = self.file.clone().unwrap_or_else(|| {
            PathBuf::from(format!("{}-groups.json", self.user_pool_id.file_stem()))
        });

        println!("📦 Backing up groups of {}", self.user_pool_id);

        let coordinator = BackupCoordinator::new(
            connect(config).await,
            ExportOptions::new(config.export.concurrency),
        );
        let summary = coordinator
            .backup_groups(&self.user_pool_id, &path)
            .await?;

        println!(
            "✅ {} groups written to {}",
            summary.records,
            path.display()
        );
        Ok(0)
    }
}
