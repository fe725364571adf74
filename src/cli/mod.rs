//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quarters")]
#[command(author, version, about = "Quarterly price changes for a single stock ticker")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (defaults to the configured level)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch prices, aggregate by quarter and chart the losing quarters
    Run(RunArgs),
    /// List supported sampling intervals
    Intervals,
    /// Validate configuration
    ValidateConfig,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}

#[derive(clap::Args, Default)]
pub struct RunArgs {
    /// Ticker symbol
    #[arg(short = 'T', long)]
    pub ticker: Option<String>,

    /// Start date (YYYY-M-D)
    #[arg(long)]
    pub start: Option<String>,

    /// End date, exclusive (YYYY-M-D)
    #[arg(long)]
    pub end: Option<String>,

    /// Sampling interval (e.g. 1d, 1wk, 1mo)
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Read bars from a CSV file instead of Yahoo Finance
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Do not open the chart window
    #[arg(long)]
    pub no_chart: bool,
}
