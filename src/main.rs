// cognito-backup - AWS Cognito user pool backup and restore
// Copyright (c) 2025 Cognito Backup Contributors
// Licensed under the MIT License

use clap::Parser;
use cognito_backup::cli::{Cli, Commands};
use cognito_backup::config::{load_config_or_default, BackupConfig};
use cognito_backup::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_effective_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            report_error(&cli, &e);
            process::exit(1);
        }
    };

    let logging_guard = match init_logging(&config.logging.log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        region = ?config.aws.region,
        "cognito-backup starting"
    );

    let exit_code = match execute_command(&cli, &config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            report_error(&cli, &e);
            1
        }
    };

    // process::exit skips destructors; flush the file appender first
    drop(logging_guard);
    process::exit(exit_code);
}

/// File (or defaults), then env overrides, then global CLI flags
fn load_effective_config(cli: &Cli) -> anyhow::Result<BackupConfig> {
    let mut config = load_config_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {e}"))?;
    Ok(config)
}

fn report_error(cli: &Cli, error: &anyhow::Error) {
    if cli.stacktrace {
        eprintln!("Error: {error:?}");
    } else {
        eprintln!("Error: {error:#}");
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: &BackupConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::BackupUsers(args) => args.execute(config).await,
        Commands::BackupGroups(args) => args.execute(config).await,
        Commands::BackupAllUsers(args) => args.execute(config).await,
        Commands::RestoreUsers(args) => args.execute(config).await,
        Commands::RestoreGroups(args) => args.execute(config).await,
        Commands::Init(args) => args.execute().await,
    }
}
