//! CLI command implementations
//!
//! This module contains all CLI command implementations, plus the helpers
//! they share.

pub mod backup_all_users;
pub mod backup_groups;
pub mod backup_users;
pub mod init;
pub mod restore_groups;
pub mod restore_users;

use crate::adapters::cognito::CognitoDirectory;
use crate::adapters::directory::IdentityDirectory;
use crate::config::{secret_string, BackupConfig, SecretString};
use crate::core::restore::{IntervalThrottle, RestoreReport, Throttle};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Builds the Cognito client for the configured region and profile
pub(crate) async fn connect(config: &BackupConfig) -> Arc<dyn IdentityDirectory> {
    Arc::new(CognitoDirectory::new(&config.aws).await)
}

/// The restore throttle for a minimum interval between calls
pub(crate) fn throttle_for(min_interval: Duration) -> Arc<dyn Throttle> {
    Arc::new(IntervalThrottle::new(min_interval))
}

/// Re-validates a configuration after command-line overrides were applied
pub(crate) fn validated(config: BackupConfig) -> anyhow::Result<BackupConfig> {
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Configuration validation failed");
        anyhow::bail!("Configuration validation failed: {e}");
    }
    Ok(config)
}

/// Clap value parser for secrets passed on the command line
pub(crate) fn parse_secret(value: &str) -> Result<SecretString, String> {
    if value.is_empty() {
        return Err("value cannot be empty".to_string());
    }
    Ok(secret_string(value.to_string()))
}

/// Asks `question` on stdout, accepting only `y`/`Y`
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Prints a restore report and maps it to an exit code
pub(crate) fn finish_restore(what: &str, report: &RestoreReport, allow_failures: bool) -> i32 {
    println!();
    println!("📊 {what} restore summary");
    println!("   Records:   {}", report.total());
    println!("   Succeeded: {}", report.succeeded());
    println!("   Failed:    {}", report.failed());
    println!("   Duration:  {:.1}s", report.duration.as_secs_f64());

    if report.is_success() {
        println!();
        println!("✅ {what} restore completed");
        return 0;
    }

    println!();
    println!("Failed records:");
    for outcome in report.failures() {
        match &outcome.error {
            Some(error) => println!("  ❌ {}: {error}", outcome.key),
            None => {
                for group_error in &outcome.group_errors {
                    println!(
                        "  ⚠️  {}: not added to {}: {}",
                        outcome.key, group_error.group, group_error.error
                    );
                }
            }
        }
    }

    if allow_failures {
        println!();
        println!("⚠️  {what} restore completed with failures (allowed)");
        0
    } else {
        println!();
        println!("❌ {what} restore completed with {} failures", report.failed());
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::restore::RecordOutcome;
    use secrecy::ExposeSecret;

    fn report_with_failure() -> RestoreReport {
        RestoreReport {
            outcomes: vec![
                RecordOutcome::created("alice"),
                RecordOutcome::failed("bob", "UsernameExistsException"),
            ],
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_finish_restore_exit_codes() {
        assert_eq!(finish_restore("User", &RestoreReport::default(), false), 0);
        assert_eq!(finish_restore("User", &report_with_failure(), false), 1);
        assert_eq!(finish_restore("User", &report_with_failure(), true), 0);
    }

    #[test]
    fn test_validated_rejects_out_of_range_override() {
        let mut config = BackupConfig::default();
        config.restore.concurrency = 10_000;
        let err = validated(config).unwrap_err().to_string();
        assert!(err.contains("restore.concurrency"), "{err}");

        assert!(validated(BackupConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_secret() {
        assert!(parse_secret("").is_err());
        assert_eq!(parse_secret("Temp#1").unwrap().expose_secret(), "Temp#1");
    }
}
