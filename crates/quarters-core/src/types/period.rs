//! The ticker and date range one analysis run covers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Interval;
use crate::error::{QuartersError, QuartersResult};

/// Ticker, date range and sampling interval for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSpec {
    ticker: String,
    start: NaiveDate,
    end: NaiveDate,
    interval: Interval,
}

impl PeriodSpec {
    /// Create a validated period. `end` is exclusive.
    pub fn new(
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> QuartersResult<Self> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(QuartersError::Validation("ticker must not be empty".into()));
        }
        if ticker.chars().any(char::is_whitespace) {
            return Err(QuartersError::Validation(format!(
                "ticker must not contain whitespace: {:?}",
                ticker
            )));
        }
        if start >= end {
            return Err(QuartersError::Validation(format!(
                "start date {} must be before end date {}",
                start, end
            )));
        }

        Ok(Self {
            ticker: ticker.to_string(),
            start,
            end,
            interval,
        })
    }

    /// Build a period from its textual parameters (`YYYY-M-D` dates).
    pub fn parse(ticker: &str, start: &str, end: &str, interval: &str) -> QuartersResult<Self> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        let interval = interval.parse::<Interval>().map_err(QuartersError::Validation)?;
        Self::new(ticker, start, end, interval)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }
}

impl fmt::Display for PeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} @ {}",
            self.ticker, self.start, self.end, self.interval
        )
    }
}

/// Parse `YYYY-M-D`; zero padding is optional.
fn parse_date(s: &str) -> QuartersResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| QuartersError::Validation(format!("invalid date {:?}: {}", s, e)))
}
