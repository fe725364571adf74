//! Yahoo Finance chart endpoint.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;
use quarters_core::error::DataError;
use quarters_core::traits::DataSource;
use quarters_core::types::{Bar, PeriodSpec, PriceSeries};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Connection settings for the chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Scale open/high/low/close by adjclose/close
    pub auto_adjust: bool,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            auto_adjust: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
    #[serde(default)]
    adjclose: Vec<AdjCloseColumn>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseColumn {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Historical bars from Yahoo Finance.
pub struct YahooDataSource {
    config: YahooConfig,
    client: Client,
}

impl YahooDataSource {
    /// Create a new client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Internal(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            ticker
        )
    }
}

/// Query parameters for one chart request. `period2` is exclusive.
fn chart_query(spec: &PeriodSpec) -> Vec<(&'static str, String)> {
    let period1 = spec.start().and_time(NaiveTime::MIN).and_utc().timestamp();
    let period2 = spec.end().and_time(NaiveTime::MIN).and_utc().timestamp();
    vec![
        ("period1", period1.to_string()),
        ("period2", period2.to_string()),
        ("interval", spec.interval().to_string()),
        ("includePrePost", "false".to_string()),
        ("events", "div,splits".to_string()),
    ]
}

fn api_error(ticker: &str, error: ChartError) -> DataError {
    if error.code == "Not Found" {
        DataError::SymbolNotFound(ticker.to_string())
    } else {
        DataError::Api {
            code: error.code,
            description: error.description,
        }
    }
}

fn column<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

/// Decode a chart payload into ascending bars in exchange-local time.
///
/// Rows with a missing price are dropped; a missing volume reads as 0.
/// Repeated timestamps keep the first row.
fn bars_from_chart(
    envelope: ChartEnvelope,
    ticker: &str,
    auto_adjust: bool,
) -> Result<Vec<Bar>, DataError> {
    let result = match (envelope.chart.result, envelope.chart.error) {
        (_, Some(error)) => return Err(api_error(ticker, error)),
        (Some(mut results), None) if !results.is_empty() => results.swap_remove(0),
        _ => return Err(DataError::NoDataAvailable),
    };

    let tz: Tz = match result.meta.exchange_timezone_name.as_deref() {
        Some(name) => name.parse().unwrap_or_else(|_| {
            warn!("Unknown exchange timezone {}, using UTC", name);
            chrono_tz::UTC
        }),
        None => chrono_tz::UTC,
    };

    let mut columns = result.indicators.quote;
    let quote = if columns.is_empty() {
        QuoteColumns::default()
    } else {
        columns.swap_remove(0)
    };
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|column| column.adjclose);

    let mut bars: Vec<Bar> = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;

    for (i, &secs) in result.timestamp.iter().enumerate() {
        let (open, high, low, close) = match (
            column(&quote.open, i),
            column(&quote.high, i),
            column(&quote.low, i),
            column(&quote.close, i),
        ) {
            (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
            _ => {
                skipped += 1;
                continue;
            }
        };

        let ratio = match adjclose.as_deref() {
            Some(adjusted) if auto_adjust && close != 0.0 => {
                column(adjusted, i).map_or(1.0, |adj| adj / close)
            }
            _ => 1.0,
        };

        let timestamp = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| DataError::ParseError(format!("timestamp out of range: {}", secs)))?
            .with_timezone(&tz)
            .naive_local();

        if bars.last().is_some_and(|last| last.timestamp == timestamp) {
            skipped += 1;
            continue;
        }

        bars.push(Bar::new(
            timestamp,
            open * ratio,
            high * ratio,
            low * ratio,
            close * ratio,
            column(&quote.volume, i).unwrap_or(0),
        ));
    }

    if skipped > 0 {
        debug!("Dropped {} incomplete or repeated rows for {}", skipped, ticker);
    }

    Ok(bars)
}

/// Turn an HTTP status and body into bars.
///
/// Non-success statuses map through the chart error envelope when the body
/// carries one. An empty result is [`DataError::NoDataAvailable`].
fn decode_response(
    status: StatusCode,
    body: String,
    ticker: &str,
    auto_adjust: bool,
) -> Result<Vec<Bar>, DataError> {
    if !status.is_success() {
        // Errors usually still arrive in the chart envelope.
        return Err(match serde_json::from_str::<ChartEnvelope>(&body) {
            Ok(ChartEnvelope {
                chart: ChartBody {
                    error: Some(error), ..
                },
            }) => api_error(ticker, error),
            _ => DataError::Api {
                code: status.to_string(),
                description: body,
            },
        });
    }

    let envelope: ChartEnvelope =
        serde_json::from_str(&body).map_err(|e| DataError::ParseError(e.to_string()))?;
    let bars = bars_from_chart(envelope, ticker, auto_adjust)?;
    if bars.is_empty() {
        return Err(DataError::NoDataAvailable);
    }
    Ok(bars)
}

#[async_trait]
impl DataSource for YahooDataSource {
    async fn get_historical_bars(&self, spec: &PeriodSpec) -> Result<PriceSeries, DataError> {
        info!(
            "Fetching {} bars for {} from {} to {}",
            spec.interval(),
            spec.ticker(),
            spec.start(),
            spec.end()
        );

        let response = self
            .client
            .get(self.chart_url(spec.ticker()))
            .query(&chart_query(spec))
            .send()
            .await
            .map_err(|e| DataError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DataError::Request(e.to_string()))?;

        let bars = decode_response(status, body, spec.ticker(), self.config.auto_adjust)?;

        info!("Data fetched for {}: {} bars", spec.ticker(), bars.len());
        PriceSeries::new(spec.ticker(), spec.interval(), bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
