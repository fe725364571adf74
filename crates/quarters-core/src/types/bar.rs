//! OHLCV (Open, High, Low, Close, Volume) data types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Interval;
use crate::error::DataError;

/// One price bar per sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bar open time, in the exchange's local wall time
    pub timestamp: NaiveDateTime,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded shares
    pub volume: u64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check if the bar is bullish (open < close).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.open < self.close
    }
}

/// Bars for one ticker, strictly ascending by timestamp.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    ticker: String,
    interval: Interval,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Create a series, rejecting out-of-order or duplicate timestamps.
    pub fn new(
        ticker: impl Into<String>,
        interval: Interval,
        bars: Vec<Bar>,
    ) -> Result<Self, DataError> {
        if let Some(index) = bars
            .windows(2)
            .position(|pair| pair[0].timestamp >= pair[1].timestamp)
        {
            return Err(DataError::UnorderedTimestamps {
                index: index + 1,
                timestamp: bars[index + 1].timestamp.to_string(),
            });
        }

        Ok(Self {
            ticker: ticker.into(),
            interval,
            bars,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// First and last bar timestamps.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((self.bars.first()?.timestamp, self.bars.last()?.timestamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_bar_direction() {
        assert!(Bar::new(at(2020, 1, 6), 10.0, 12.0, 9.0, 11.0, 100).is_bullish());
        assert!(!Bar::new(at(2020, 1, 6), 10.0, 12.0, 9.0, 10.0, 100).is_bullish());
    }

    #[test]
    fn test_series_accepts_ascending() {
        let bars = vec![
            Bar::new(at(2020, 1, 6), 1.0, 1.0, 1.0, 1.0, 0),
            Bar::new(at(2020, 1, 13), 1.0, 1.0, 1.0, 1.0, 0),
        ];
        let series = PriceSeries::new("SNAP", Interval::Week1, bars).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.span(), Some((at(2020, 1, 6), at(2020, 1, 13))));
    }

    #[test]
    fn test_series_rejects_duplicates() {
        let bars = vec![
            Bar::new(at(2020, 1, 6), 1.0, 1.0, 1.0, 1.0, 0),
            Bar::new(at(2020, 1, 13), 1.0, 1.0, 1.0, 1.0, 0),
            Bar::new(at(2020, 1, 13), 1.0, 1.0, 1.0, 1.0, 0),
        ];
        let err = PriceSeries::new("SNAP", Interval::Week1, bars).unwrap_err();
        assert!(matches!(err, DataError::UnorderedTimestamps { index: 2, .. }));
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = PriceSeries::new("SNAP", Interval::Day1, Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.span(), None);
    }
}
