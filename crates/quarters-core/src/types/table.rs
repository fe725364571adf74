//! Row-oriented view of a price series with derived columns.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Bar, CandleType, Interval, PriceSeries, QuarterKey};

/// One bar plus the columns added by the pipeline stages.
///
/// `None` marks a value that is missing for this row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub bar: Bar,
    pub candle_type: Option<CandleType>,
    pub quarter: Option<QuarterKey>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub percentage_change: Option<f64>,
}

impl TableRow {
    /// A row with no derived columns yet.
    pub fn new(bar: Bar) -> Self {
        Self {
            bar,
            candle_type: None,
            quarter: None,
            start_date: None,
            end_date: None,
            percentage_change: None,
        }
    }
}

/// Price table passed by value from stage to stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    ticker: String,
    interval: Interval,
    rows: Vec<TableRow>,
}

impl PriceTable {
    /// Build a table with one row per bar, in series order.
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            ticker: series.ticker().to_string(),
            interval: series.interval(),
            rows: series.bars().iter().copied().map(TableRow::new).collect(),
        }
    }

    /// Build a table from rows that are already in order.
    pub fn from_rows(ticker: impl Into<String>, interval: Interval, rows: Vec<TableRow>) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            rows,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [TableRow] {
        &mut self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Apply `f` to every row, consuming the table.
    pub fn map_rows<F>(self, f: F) -> Self
    where
        F: FnMut(TableRow) -> TableRow,
    {
        Self {
            ticker: self.ticker,
            interval: self.interval,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }

    /// Get the first N rows.
    pub fn head(&self, n: usize) -> &[TableRow] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Get the last N rows.
    pub fn tail(&self, n: usize) -> &[TableRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn series(n: usize) -> PriceSeries {
        let base = NaiveDate::from_ymd_opt(2020, 1, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = (0..n)
            .map(|i| {
                let p = 10.0 + i as f64;
                Bar::new(base + Duration::weeks(i as i64), p, p + 1.0, p - 1.0, p + 0.5, 1000)
            })
            .collect();
        PriceSeries::new("SNAP", Interval::Week1, bars).unwrap()
    }

    #[test]
    fn test_from_series_has_no_derived_columns() {
        let table = PriceTable::from_series(&series(3));
        assert_eq!(table.len(), 3);
        assert_eq!(table.ticker(), "SNAP");
        assert!(table.rows().iter().all(|r| r.candle_type.is_none()
            && r.quarter.is_none()
            && r.percentage_change.is_none()));
    }

    #[test]
    fn test_head_and_tail_clamp() {
        let table = PriceTable::from_series(&series(5));
        assert_eq!(table.head(3).len(), 3);
        assert_eq!(table.head(30).len(), 5);
        assert_eq!(table.tail(2)[0].bar.open, 13.0);
        assert_eq!(table.tail(10).len(), 5);
    }

    #[test]
    fn test_map_rows_keeps_order() {
        let table = PriceTable::from_series(&series(4)).map_rows(|mut row| {
            row.percentage_change = Some(row.bar.open);
            row
        });
        let values: Vec<_> = table.rows().iter().map(|r| r.percentage_change).collect();
        assert_eq!(values, vec![Some(10.0), Some(11.0), Some(12.0), Some(13.0)]);
    }
}
