//! Rate-limited restorer
//!
//! Replays a [`RestoreJob`] against a [`RestoreTarget`]. Records are created
//! with bounded concurrency; every remote call (creates and the membership
//! adds that follow them) first takes a slot from one shared [`Throttle`].
//! A failing record never stops the others: each ends up as one
//! [`RecordOutcome`] in the report.

use super::job::RestoreJob;
use super::report::{GroupAddError, RecordOutcome, RestoreReport};
use super::targets::RestoreTarget;
use super::throttle::Throttle;
use super::transform::prepare_for_restore;
use crate::domain::Record;
use crate::log_record_failure;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Default number of records created concurrently
pub const DEFAULT_RESTORE_CONCURRENCY: usize = 1;

/// Default number of group adds in flight per record
pub const DEFAULT_GROUP_CONCURRENCY: usize = 1;

/// Restorer tuning
#[derive(Debug, Clone, Copy)]
pub struct RestoreOptions {
    /// Records replayed concurrently
    pub concurrency: usize,

    /// Group adds in flight for one record
    pub group_concurrency: usize,
}

impl RestoreOptions {
    pub fn new(concurrency: usize, group_concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
            group_concurrency: group_concurrency.max(1),
        }
    }
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self::new(DEFAULT_RESTORE_CONCURRENCY, DEFAULT_GROUP_CONCURRENCY)
    }
}

pub struct Restorer {
    options: RestoreOptions,
    throttle: Arc<dyn Throttle>,
}

impl Restorer {
    pub fn new(options: RestoreOptions, throttle: Arc<dyn Throttle>) -> Self {
        Self { options, throttle }
    }

    /// Replays every record in `job`
    ///
    /// Never fails as a whole; inspect the report for per-record failures.
    pub async fn restore(&self, job: RestoreJob, target: &dyn RestoreTarget) -> RestoreReport {
        let start = Instant::now();
        let total = job.len();

        let outcomes: Vec<RecordOutcome> = stream::iter(job.records)
            .map(|record| self.replay(record, target))
            .buffer_unordered(self.options.concurrency)
            .collect()
            .await;

        debug_assert_eq!(outcomes.len(), total);

        RestoreReport {
            outcomes,
            duration: start.elapsed(),
        }
    }

    async fn replay(&self, record: Record, target: &dyn RestoreTarget) -> RecordOutcome {
        let groups = record.groups();
        let prepared = prepare_for_restore(record);
        let key = prepared.display_key().to_string();

        self.throttle.acquire().await;
        if let Err(e) = target.create(&prepared).await {
            log_record_failure!(key, "create", e);
            return RecordOutcome::failed(key, e.to_string());
        }

        tracing::debug!(record = %key, groups = groups.len(), "Record created");

        let mut outcome = RecordOutcome::created(key);
        if groups.is_empty() {
            return outcome;
        }

        let prepared = &prepared;
        outcome.group_errors = stream::iter(groups)
            .map(|group| async move {
                self.throttle.acquire().await;
                target
                    .add_to_group(prepared, &group)
                    .await
                    .err()
                    .map(|e| GroupAddError {
                        group,
                        error: e.to_string(),
                    })
            })
            .buffer_unordered(self.options.group_concurrency)
            .filter_map(|failure| async move { failure })
            .collect()
            .await;

        for failure in &outcome.group_errors {
            log_record_failure!(outcome.key, "add_to_group", failure.error);
        }

        outcome
    }
}
