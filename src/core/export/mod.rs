//! User pool export
//!
//! This module provides the backup side of cognito-backup:
//! - [`Exporter`] - follows a paginated listing to the end, with optional
//!   per-record enrichment
//! - [`JsonArraySink`] - streams records into a JSON array file
//! - [`BackupCoordinator`] - user, group and full-account backups
//! - Summary and reporting

pub mod coordinator;
pub mod exporter;
pub mod sink;
pub mod sources;
pub mod summary;

pub use coordinator::BackupCoordinator;
pub use exporter::{
    ExportOptions, Exporter, PageSource, RecordEnricher, DEFAULT_EXPORT_CONCURRENCY,
};
pub use sink::{JsonArraySink, RecordSink};
pub use sources::{enumerate_user_pools, GroupMembershipEnricher, GroupPages, UserPages};
pub use summary::{AccountExportSummary, ExportSummary, PoolExport};
