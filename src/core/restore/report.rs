//! Restore outcome reporting
//!
//! Every record in a restore job yields exactly one [`RecordOutcome`], so a
//! report always accounts for the whole input.

use std::time::Duration;

/// A group add that failed after the record itself was created
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAddError {
    pub group: String,
    pub error: String,
}

/// Result of replaying one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    /// Username or group name, for reporting
    pub key: String,

    /// Whether the create call succeeded
    pub created: bool,

    /// Create failure, if any
    pub error: Option<String>,

    /// Membership replays that failed; only populated after a successful create
    pub group_errors: Vec<GroupAddError>,
}

impl RecordOutcome {
    pub fn created(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            created: true,
            error: None,
            group_errors: Vec::new(),
        }
    }

    pub fn failed(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            created: false,
            error: Some(error.into()),
            group_errors: Vec::new(),
        }
    }

    /// Created, and every group add succeeded
    pub fn is_success(&self) -> bool {
        self.created && self.group_errors.is_empty()
    }
}

/// Restore report
#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    /// One outcome per input record, in completion order
    pub outcomes: Vec<RecordOutcome>,

    /// Wall-clock duration of the restore
    pub duration: Duration,
}

impl RestoreReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Outcomes with a create failure or at least one group failure
    pub fn failures(&self) -> impl Iterator<Item = &RecordOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Log the summary
    pub fn log_summary(&self, what: &str) {
        tracing::info!(
            total = self.total(),
            succeeded = self.succeeded(),
            failed = self.failed(),
            duration_ms = self.duration.as_millis() as u64,
            "{what} restore completed"
        );

        for outcome in self.failures() {
            match &outcome.error {
                Some(error) => tracing::warn!(key = %outcome.key, error = %error, "Create failed"),
                None => {
                    for group_error in &outcome.group_errors {
                        tracing::warn!(
                            key = %outcome.key,
                            group = %group_error.group,
                            error = %group_error.error,
                            "Group membership not restored"
                        );
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut partial = RecordOutcome::created("carol");
        partial.group_errors.push(GroupAddError {
            group: "ops".to_string(),
            error: "group not found".to_string(),
        });

        let report = RestoreReport {
            outcomes: vec![
                RecordOutcome::created("alice"),
                RecordOutcome::failed("bob", "UsernameExistsException"),
                partial,
            ],
            duration: Duration::from_millis(10),
        };

        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_success());

        let keys: Vec<_> = report.failures().map(|o| o.key.as_str()).collect();
        assert_eq!(keys, vec!["bob", "carol"]);
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = RestoreReport::default();
        assert_eq!(report.total(), 0);
        assert!(report.is_success());
    }
}
