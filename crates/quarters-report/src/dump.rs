//! Plain-text dumps of the price table.

use chrono::{NaiveDateTime, NaiveTime};
use quarters_core::types::{PriceTable, TableRow};
use std::fmt::Write;
use tracing::{info, warn};

/// Rows logged from the top of the table.
pub const HEAD_ROWS: usize = 30;
/// Rows logged from the bottom of the table.
pub const TAIL_ROWS: usize = 10;

const MISSING: &str = "-";

/// Log the head and tail of the table, or warn when there is none.
pub fn log_table(table: Option<&PriceTable>) {
    let Some(table) = table else {
        warn!("No data to log. Fetch the data first.");
        return;
    };

    info!(
        "First {} of {} rows for {}\n{}",
        table.head(HEAD_ROWS).len(),
        table.len(),
        table.ticker(),
        format_rows(table.head(HEAD_ROWS))
    );
    info!(
        "Last {} of {} rows for {}\n{}",
        table.tail(TAIL_ROWS).len(),
        table.len(),
        table.ticker(),
        format_rows(table.tail(TAIL_ROWS))
    );
}

fn timestamp(ts: &NaiveDateTime) -> String {
    if ts.time() == NaiveTime::MIN {
        ts.format("%Y-%m-%d").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn or_missing<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| MISSING.to_string(), f)
}

/// Render rows as a fixed-width text table with a header line.
pub fn format_rows(rows: &[TableRow]) -> String {
    let mut s = String::new();

    let _ = writeln!(
        s,
        "{:<16} {:>10} {:>10} {:>10} {:>10} {:>12} {:<8} {:<7} {:<16} {:<16} {:>8}",
        "Date", "Open", "High", "Low", "Close", "Volume", "Candle", "Quarter", "Start", "End",
        "Change%"
    );

    for row in rows {
        let bar = &row.bar;
        let _ = writeln!(
            s,
            "{:<16} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>12} {:<8} {:<7} {:<16} {:<16} {:>8}",
            timestamp(&bar.timestamp),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.volume,
            or_missing(row.candle_type, |c| c.to_string()),
            or_missing(row.quarter, |q| q.to_string()),
            or_missing(row.start_date.as_ref(), timestamp),
            or_missing(row.end_date.as_ref(), timestamp),
            or_missing(row.percentage_change, |p| format!("{:.2}", p)),
        );
    }

    s
}
