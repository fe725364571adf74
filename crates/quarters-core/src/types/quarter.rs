//! Calendar quarter keys and per-quarter summaries.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-month calendar period, displayed as `"{year}.{quarter}"`.
///
/// Ordering is by year, then quarter, which matches the lexical order of
/// the displayed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuarterKey {
    year: i32,
    quarter: u8,
}

impl QuarterKey {
    /// Quarter containing the given timestamp.
    pub fn of(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            quarter: (timestamp.month0() / 3 + 1) as u8,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1 through 4.
    pub fn quarter(&self) -> u8 {
        self.quarter
    }
}

impl fmt::Display for QuarterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.year, self.quarter)
    }
}

/// Aggregate figures for one quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub key: QuarterKey,
    /// Earliest bar timestamp in the quarter
    pub start_date: NaiveDateTime,
    /// Latest bar timestamp in the quarter
    pub end_date: NaiveDateTime,
    /// Open of the bar at `start_date`
    pub start_open: f64,
    /// Close of the bar at `end_date`
    pub end_close: f64,
    /// (end_close - start_open) / start_open * 100
    pub percentage_change: f64,
    /// Number of bars in the quarter
    pub bar_count: usize,
}

impl PeriodSummary {
    pub fn is_negative(&self) -> bool {
        self.percentage_change < 0.0
    }
}
