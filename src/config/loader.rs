//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::BackupConfig;
use super::secret::secret_string;
use crate::domain::errors::CognitoBackupError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into BackupConfig
/// 4. Applies environment variable overrides (COGNITO_BACKUP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a `Configuration` error if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use cognito_backup::config::loader::load_config;
///
/// let config = load_config("cognito-backup.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BackupConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CognitoBackupError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CognitoBackupError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: BackupConfig = toml::from_str(&contents)
        .map_err(|e| CognitoBackupError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Builds the configuration without a file: defaults plus environment overrides
///
/// # Errors
///
/// Returns a `Configuration` error if an override is malformed or the result is invalid
pub fn load_default_config() -> Result<BackupConfig> {
    let mut config = BackupConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

/// Loads from `path` when given, otherwise falls back to [`load_default_config`]
pub fn load_config_or_default(path: Option<&str>) -> Result<BackupConfig> {
    match path {
        Some(path) => load_config(path),
        None => load_default_config(),
    }
}

fn validate(config: &BackupConfig) -> Result<()> {
    config.validate().map_err(|e| {
        CognitoBackupError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CognitoBackupError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parses a numeric override, naming the variable on failure
fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CognitoBackupError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using COGNITO_BACKUP_* prefix
///
/// Environment variables follow the pattern: COGNITO_BACKUP_<SECTION>_<KEY>
/// For example: COGNITO_BACKUP_RESTORE_DELAY_MS, COGNITO_BACKUP_AWS_REGION
fn apply_env_overrides(config: &mut BackupConfig) -> Result<()> {
    // AWS overrides
    if let Ok(val) = std::env::var("COGNITO_BACKUP_AWS_REGION") {
        config.aws.region = Some(val);
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_AWS_PROFILE") {
        config.aws.profile = Some(val);
    }

    // Export overrides
    if let Ok(val) = std::env::var("COGNITO_BACKUP_EXPORT_CONCURRENCY") {
        config.export.concurrency = parse_override("COGNITO_BACKUP_EXPORT_CONCURRENCY", &val)?;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_EXPORT_INCLUDE_GROUP_MEMBERSHIPS") {
        config.export.include_group_memberships =
            parse_override("COGNITO_BACKUP_EXPORT_INCLUDE_GROUP_MEMBERSHIPS", &val)?;
    }

    // Restore overrides
    if let Ok(val) = std::env::var("COGNITO_BACKUP_RESTORE_DELAY_MS") {
        config.restore.delay_ms = parse_override("COGNITO_BACKUP_RESTORE_DELAY_MS", &val)?;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_RESTORE_CONCURRENCY") {
        config.restore.concurrency = parse_override("COGNITO_BACKUP_RESTORE_CONCURRENCY", &val)?;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_RESTORE_GROUP_CONCURRENCY") {
        config.restore.group_concurrency =
            parse_override("COGNITO_BACKUP_RESTORE_GROUP_CONCURRENCY", &val)?;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_RESTORE_TEMPORARY_PASSWORD") {
        config.restore.temporary_password = Some(secret_string(val));
    }

    // Logging overrides
    if let Ok(val) = std::env::var("COGNITO_BACKUP_LOGGING_LOG_LEVEL") {
        config.logging.log_level = val;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled =
            parse_override("COGNITO_BACKUP_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("COGNITO_BACKUP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
