// Attendance Report - Daily first-IN attendance report mailer
// Copyright (c) 2025 Attendance Report Contributors
// Licensed under the MIT License

use attendance_report::cli::commands::{EXIT_CONFIG, EXIT_FATAL};
use attendance_report::cli::{Cli, Commands};
use attendance_report::config::{load_config, ReportSystemConfig};
use attendance_report::logging::init_logging;
use clap::Parser;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Attendance Report - daily first-IN report mailer"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        let _ = shutdown_tx.send(true);
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), shutting down");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                }
            }
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), shutting down");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, &config, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(
    cli: &Cli,
    config: &ReportSystemConfig,
    shutdown_signal: watch::Receiver<bool>,
) -> anyhow::Result<i32> {
    let command = cli.command_or_default();
    if let Err(e) = command.preflight(config) {
        tracing::error!(error = %e, "Missing configuration for command");
        eprintln!("❌ Configuration error: {e}");
        return Ok(EXIT_CONFIG);
    }

    match command {
        Commands::Schedule(args) => args.execute(config, shutdown_signal).await,
        Commands::Run(args) => args.execute(config).await,
        Commands::Check(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(config, cli.config.as_deref()).await,
    }
}
