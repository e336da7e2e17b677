//! Restore coordinator - loads backup files and replays them into a pool

use super::job::RestoreJob;
use super::report::RestoreReport;
use super::restorer::{RestoreOptions, Restorer};
use super::targets::{GroupRestoreTarget, RestoreTarget, UserRestoreTarget};
use super::throttle::Throttle;
use crate::adapters::directory::IdentityDirectory;
use crate::config::SecretString;
use crate::domain::context::ResultExt;
use crate::domain::{Result, UserPoolId};
use std::path::Path;
use std::sync::Arc;

/// Runs user and group restores against one directory
pub struct RestoreCoordinator {
    directory: Arc<dyn IdentityDirectory>,
    restorer: Restorer,
}

impl RestoreCoordinator {
    pub fn new(
        directory: Arc<dyn IdentityDirectory>,
        options: RestoreOptions,
        throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            directory,
            restorer: Restorer::new(options, throttle),
        }
    }

    /// Recreates the users in `path` inside `pool`
    ///
    /// Every user gets `temporary_password`; group memberships recorded in
    /// the backup are replayed once the user exists. The groups themselves
    /// must already be present (see [`Self::restore_groups`]).
    pub async fn restore_users(
        &self,
        pool: &UserPoolId,
        path: &Path,
        temporary_password: SecretString,
    ) -> Result<RestoreReport> {
        let target =
            UserRestoreTarget::new(self.directory.clone(), pool.clone(), temporary_password);
        self.run("User", pool, path, &target).await
    }

    /// Recreates the groups in `path` inside `pool`
    pub async fn restore_groups(&self, pool: &UserPoolId, path: &Path) -> Result<RestoreReport> {
        let target = GroupRestoreTarget::new(self.directory.clone(), pool.clone());
        self.run("Group", pool, path, &target).await
    }

    async fn run(
        &self,
        what: &str,
        pool: &UserPoolId,
        path: &Path,
        target: &dyn RestoreTarget,
    ) -> Result<RestoreReport> {
        let job = RestoreJob::from_file(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?;

        tracing::info!(
            pool_id = %pool,
            path = %path.display(),
            records = job.len(),
            "{what} restore started"
        );

        let report = self.restorer.restore(job, target).await;
        report.log_summary(what);
        Ok(report)
    }
}
