//! Run command implementation.

use anyhow::{Context, Result};
use quarters_analysis::{aggregate, classify, Aggregation};
use quarters_config::{AnalysisSettings, AppConfig, DataSettings};
use quarters_core::traits::DataSource;
use quarters_core::types::{PeriodSpec, PriceTable};
use quarters_data::{CsvDataSource, YahooConfig, YahooDataSource};
use quarters_report::{log_table, PieChart};
use std::io::{self, IsTerminal};
use tracing::info;

use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    let spec = period_spec(&args, &config.analysis)?;
    info!("Starting analysis: {}", spec);

    // Load data
    let source: Box<dyn DataSource> = match &args.data {
        Some(path) => Box::new(CsvDataSource::new(path).context("Failed to open CSV data")?),
        None => Box::new(YahooDataSource::new(yahoo_config(&config.data))?),
    };
    let series = source
        .get_historical_bars(&spec)
        .await
        .with_context(|| format!("Failed to fetch {} from {}", spec.ticker(), source.name()))?;
    if let Some((first, last)) = series.span() {
        info!("Fetched {} bars from {} to {}", series.len(), first, last);
    }

    // Classify and aggregate
    let table = classify(PriceTable::from_series(&series));
    let aggregation = aggregate(table).context("Quarterly aggregation failed")?;
    info!(
        "Aggregated {} bars into {} quarters, {} closed lower",
        aggregation.table.len(),
        aggregation.summaries.len(),
        aggregation.negative().count()
    );
    let Aggregation { table, .. } = aggregation;

    log_table(Some(&table));

    // Chart
    let mut chart = PieChart::negative_changes(spec.ticker(), &table);
    if chart.is_empty() {
        info!("No quarter closed lower, nothing to chart");
    } else if args.no_chart {
        info!("Chart skipped (--no-chart)");
    } else if !io::stdout().is_terminal() {
        info!("Standard output is not a terminal, chart skipped");
    } else {
        chart = tokio::task::spawn_blocking(move || {
            let mut chart = chart;
            chart.show().map(|()| chart)
        })
        .await
        .context("Chart task failed")??;
    }
    info!("Chart shown: {}", chart.was_shown());

    Ok(())
}

/// Config values overridden by any `run` flags.
fn period_spec(args: &RunArgs, settings: &AnalysisSettings) -> Result<PeriodSpec> {
    let merged = AnalysisSettings {
        ticker: args.ticker.clone().unwrap_or_else(|| settings.ticker.clone()),
        start: args.start.clone().unwrap_or_else(|| settings.start.clone()),
        end: args.end.clone().unwrap_or_else(|| settings.end.clone()),
        interval: args.interval.clone().unwrap_or_else(|| settings.interval.clone()),
    };
    merged.period_spec().context("Invalid analysis period")
}

fn yahoo_config(settings: &DataSettings) -> YahooConfig {
    let defaults = YahooConfig::default();
    YahooConfig {
        base_url: settings.base_url.clone().unwrap_or(defaults.base_url),
        user_agent: settings.user_agent.clone().unwrap_or(defaults.user_agent),
        auto_adjust: settings.auto_adjust,
    }
}
