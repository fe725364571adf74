//! CSV data source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use quarters_core::error::DataError;
use quarters_core::traits::DataSource;
use quarters_core::types::{Bar, PeriodSpec, PriceSeries};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CSV record format.
///
/// Price columns tolerate `null` and empty cells, as written by Yahoo's
/// export for days without trading.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "Datetime", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", default, deserialize_with = "csv::invalid_option")]
    open: Option<f64>,
    #[serde(alias = "High", default, deserialize_with = "csv::invalid_option")]
    high: Option<f64>,
    #[serde(alias = "Low", default, deserialize_with = "csv::invalid_option")]
    low: Option<f64>,
    #[serde(alias = "Close", default, deserialize_with = "csv::invalid_option")]
    close: Option<f64>,
    #[serde(alias = "Volume", default, deserialize_with = "csv::invalid_option")]
    volume: Option<f64>,
}

/// CSV export of one ticker's bars.
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a new CSV data source.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::Internal(format!(
                "CSV file not found: {}",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load every bar in the file, sorted by timestamp.
    fn load_all(&self) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();
        let mut skipped = 0usize;

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            let (open, high, low, close) =
                match (record.open, record.high, record.low, record.close) {
                    (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                    _ => {
                        skipped += 1;
                        continue;
                    }
                };

            bars.push(Bar::new(
                parse_timestamp(&record.date)?,
                open,
                high,
                low,
                close,
                record.volume.unwrap_or(0.0).max(0.0) as u64,
            ));
        }

        if skipped > 0 {
            debug!("Dropped {} incomplete rows from {}", skipped, self.path.display());
        }

        // Stable sort, so dedup keeps the first of each timestamp.
        bars.sort_by_key(|b| b.timestamp);
        bars.dedup_by_key(|b| b.timestamp);

        Ok(bars)
    }
}

/// Parse various timestamp formats into wall-clock time.
///
/// Offsets such as `-05:00` are dropped, keeping the local wall time.
fn parse_timestamp(date_str: &str) -> Result<NaiveDateTime, DataError> {
    let date_str = date_str.trim();

    for format in ["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt.naive_local());
        }
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt);
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN));
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl DataSource for CsvDataSource {
    async fn get_historical_bars(&self, spec: &PeriodSpec) -> Result<PriceSeries, DataError> {
        info!("Loading {} from {}", spec.ticker(), self.path.display());

        let start = spec.start().and_time(NaiveTime::MIN);
        let end = spec.end().and_time(NaiveTime::MIN);

        let all = self.load_all()?;
        let total = all.len();
        let bars: Vec<Bar> = all
            .into_iter()
            .filter(|b| b.timestamp >= start && b.timestamp < end)
            .collect();

        debug!("Kept {} of {} rows inside {}..{}", bars.len(), total, start, end);

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable);
        }

        PriceSeries::new(spec.ticker(), spec.interval(), bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
