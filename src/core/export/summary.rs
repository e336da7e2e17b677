//! Export summary and reporting

use std::path::PathBuf;
use std::time::Duration;

/// Summary of one export (one listing into one sink)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportSummary {
    /// Listing pages fetched
    pub pages: usize,

    /// Records written to the sink
    pub records: usize,

    /// Wall-clock duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records per second, for reporting
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            return self.records as f64;
        }
        self.records as f64 / secs
    }

    pub fn log_summary(&self, what: &str, pool_id: &str) {
        tracing::info!(
            pool_id = %pool_id,
            pages = self.pages,
            records = self.records,
            duration_ms = self.duration.as_millis() as u64,
            "{what} backup completed"
        );
    }
}

/// One pool's result within a full-account export
#[derive(Debug, Clone)]
pub struct PoolExport {
    /// Pool that was exported
    pub pool_id: String,

    /// File the pool was written to
    pub path: PathBuf,

    /// Export counters
    pub summary: ExportSummary,
}

/// Aggregate of a full-account export
#[derive(Debug, Clone, Default)]
pub struct AccountExportSummary {
    /// Per-pool results, in export order
    pub pools: Vec<PoolExport>,

    /// Total wall-clock duration
    pub duration: Duration,
}

impl AccountExportSummary {
    /// Records exported across every pool
    pub fn total_records(&self) -> usize {
        self.pools.iter().map(|p| p.summary.records).sum()
    }
}
