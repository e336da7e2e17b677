//! Backup coordinator - wires the exporter to the directory and backup files
//!
//! Each export streams into `<file>.partial` and is renamed onto the final
//! path only once the listing completed, so an aborted run never leaves a
//! file that looks like a complete backup.

use super::exporter::{ExportOptions, Exporter, PageSource, RecordEnricher};
use super::sink::JsonArraySink;
use super::sources::{enumerate_user_pools, GroupMembershipEnricher, GroupPages, UserPages};
use super::summary::{AccountExportSummary, ExportSummary, PoolExport};
use crate::adapters::directory::IdentityDirectory;
use crate::domain::context::ResultExt;
use crate::domain::{Result, UserPoolId};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Runs user and group backups against one directory
pub struct BackupCoordinator {
    directory: Arc<dyn IdentityDirectory>,
    exporter: Exporter,
}

impl BackupCoordinator {
    pub fn new(directory: Arc<dyn IdentityDirectory>, options: ExportOptions) -> Self {
        Self {
            directory,
            exporter: Exporter::new(options),
        }
    }

    /// Backs up every user in `pool` to `path`
    ///
    /// With `with_groups` each user gets a `Groups` array of its memberships.
    pub async fn backup_users(
        &self,
        pool: &UserPoolId,
        path: &Path,
        with_groups: bool,
    ) -> Result<ExportSummary> {
        tracing::info!(pool_id = %pool, path = %path.display(), with_groups, "Backing up users");

        let source = UserPages::new(self.directory.clone(), pool.clone());
        let enricher = with_groups
            .then(|| GroupMembershipEnricher::new(self.directory.clone(), pool.clone()));

        let summary = self
            .export_to_file(
                &source,
                enricher.as_ref().map(|e| e as &dyn RecordEnricher),
                path,
            )
            .await
            .with_context(|| format!("User backup of {pool} failed"))?;

        summary.log_summary("User", pool.as_str());
        Ok(summary)
    }

    /// Backs up every group in `pool` to `path`
    pub async fn backup_groups(&self, pool: &UserPoolId, path: &Path) -> Result<ExportSummary> {
        tracing::info!(pool_id = %pool, path = %path.display(), "Backing up groups");

        let source = GroupPages::new(self.directory.clone(), pool.clone());
        let summary = self
            .export_to_file(&source, None, path)
            .await
            .with_context(|| format!("Group backup of {pool} failed"))?;

        summary.log_summary("Group", pool.as_str());
        Ok(summary)
    }

    /// Backs up the users of every pool in the account into `dir`
    ///
    /// Pools are exported one after another, each to
    /// `<dir>/<pool file stem>.json`. The first failing pool aborts the run;
    /// files already written for earlier pools are kept.
    pub async fn backup_all_users(
        &self,
        dir: &Path,
        with_groups: bool,
    ) -> Result<AccountExportSummary> {
        let start = Instant::now();
        let pools = enumerate_user_pools(self.directory.as_ref()).await?;

        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let mut account = AccountExportSummary::default();
        for pool in pools {
            let path = dir.join(format!("{}.json", pool.file_stem()));
            let summary = self.backup_users(&pool, &path, with_groups).await?;
            account.pools.push(PoolExport {
                pool_id: pool.into_inner(),
                path,
                summary,
            });
        }

        account.duration = start.elapsed();
        tracing::info!(
            pools = account.pools.len(),
            records = account.total_records(),
            duration_ms = account.duration.as_millis() as u64,
            "Account backup completed"
        );
        Ok(account)
    }

    async fn export_to_file(
        &self,
        source: &dyn PageSource,
        enricher: Option<&dyn RecordEnricher>,
        path: &Path,
    ) -> Result<ExportSummary> {
        let partial = partial_path(path);
        let mut sink = JsonArraySink::create(&partial)
            .await
            .with_context(|| format!("Failed to create {}", partial.display()))?;

        match self.exporter.export(source, enricher, &mut sink).await {
            Ok(summary) => {
                tokio::fs::rename(&partial, path)
                    .await
                    .with_context(|| format!("Failed to move backup into {}", path.display()))?;
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!(
                    partial = %partial.display(),
                    records = sink.written(),
                    "Export aborted; partial output left in place"
                );
                Err(e)
            }
        }
    }
}

/// `<path>.partial`
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".partial");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("backups/eu-west-1_abc.json")),
            PathBuf::from("backups/eu-west-1_abc.json.partial")
        );
    }
}
