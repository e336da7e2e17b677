//! Logging and observability
//!
//! Structured logging via `tracing`:
//! - Human-readable console output on stderr
//! - Optional JSON file output with daily or hourly rotation
//! - `RUST_LOG` style filtering
//!
//! # Example
//!
//! ```no_run
//! use cognito_backup::logging::init_logging;
//! use cognito_backup::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(pool_id = "eu-west-1_abc", "Backup started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a fetched listing page
///
/// # Example
///
/// ```no_run
/// use cognito_backup::log_page_fetched;
///
/// log_page_fetched!(3, 60, true);
/// ```
#[macro_export]
macro_rules! log_page_fetched {
    ($page:expr, $records:expr, $has_more:expr) => {
        tracing::debug!(
            page = $page,
            records = $records,
            has_more = $has_more,
            "Fetched listing page"
        );
    };
}

/// Log a record that could not be restored
///
/// # Example
///
/// ```no_run
/// use cognito_backup::log_record_failure;
///
/// log_record_failure!("alice", "AdminCreateUser", "UsernameExistsException");
/// ```
#[macro_export]
macro_rules! log_record_failure {
    ($key:expr, $operation:expr, $error:expr) => {
        tracing::warn!(
            record = %$key,
            operation = $operation,
            error = %$error,
            "Record restore failed"
        );
    };
}
