//! Data source trait definitions.

use crate::error::DataError;
use crate::types::{PeriodSpec, PriceSeries};
use async_trait::async_trait;

/// Trait for historical data sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch historical bars.
    ///
    /// # Arguments
    /// * `spec` - Ticker, date range (end exclusive) and interval
    ///
    /// # Returns
    /// A series ordered from oldest to newest. An empty range is reported
    /// as [`DataError::NoDataAvailable`] rather than an empty series.
    async fn get_historical_bars(&self, spec: &PeriodSpec) -> Result<PriceSeries, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
