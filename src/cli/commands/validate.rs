//! Validate configuration command.

use anyhow::Result;
use quarters_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, using built-in defaults");
    }

    match config.analysis.period_spec() {
        Ok(spec) => {
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Log format: {}", config.logging.format);
            println!("Ticker: {}", spec.ticker());
            println!("Start: {}", spec.start());
            println!("End (exclusive): {}", spec.end());
            println!("Interval: {}", spec.interval());
            println!("Auto-adjust prices: {}", config.data.auto_adjust);
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
