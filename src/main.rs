//! Quarterly price change analysis CLI.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use quarters_config::load_config;
use quarters_report::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    // Setup logging
    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => config.logging.level.as_str(),
    };
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config
            .logging
            .format
            .parse::<LogFormat>()
            .map_err(anyhow::Error::msg)?
    };
    setup_logging(log_level, log_format);

    // Execute command
    match cli.command.unwrap_or_default() {
        Commands::Run(args) => cli::commands::run::run(args, &config).await,
        Commands::Intervals => cli::commands::intervals::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}
