//! Quarterly aggregation.
//!
//! Rows are grouped by [`QuarterKey`]. For each group the period start and
//! end are the min and max timestamps of its rows, the baseline is the open
//! of the start bar and the result is the close of the end bar. Start and
//! end dates are written onto every row of the group; the percentage change
//! only onto the group's last row in table order.

use std::collections::BTreeMap;

use quarters_core::error::AnalysisError;
use quarters_core::types::{Bar, PeriodSummary, PriceTable, QuarterKey};
use tracing::{debug, info};

/// Output of [`aggregate`].
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Input table with the quarter and period columns filled in
    pub table: PriceTable,
    /// One summary per quarter, ordered by key
    pub summaries: Vec<PeriodSummary>,
}

impl Aggregation {
    /// Summaries of quarters that closed below their opening price.
    pub fn negative(&self) -> impl Iterator<Item = &PeriodSummary> {
        self.summaries.iter().filter(|s| s.is_negative())
    }
}

/// Percentage change from `start_open` to `end_close`.
///
/// Returns `None` when `start_open` is zero.
pub fn percentage_change(start_open: f64, end_close: f64) -> Option<f64> {
    if start_open == 0.0 {
        return None;
    }
    Some((end_close - start_open) / start_open * 100.0)
}

/// Group rows by quarter and compute one summary per quarter.
///
/// An empty table yields no summaries. Fails with
/// [`AnalysisError::ZeroBaseline`] when a quarter opens at zero.
pub fn aggregate(mut table: PriceTable) -> Result<Aggregation, AnalysisError> {
    let mut groups: BTreeMap<QuarterKey, Vec<usize>> = BTreeMap::new();
    for (index, row) in table.rows_mut().iter_mut().enumerate() {
        let key = QuarterKey::of(&row.bar.timestamp);
        row.quarter = Some(key);
        groups.entry(key).or_default().push(index);
    }

    debug!("Aggregating {} rows into {} quarters", table.len(), groups.len());

    let mut summaries = Vec::with_capacity(groups.len());
    for (key, indices) in groups {
        let bars: Vec<&Bar> = indices.iter().map(|&i| &table.rows()[i].bar).collect();
        let Some(summary) = summarize(key, &bars)? else {
            continue;
        };

        info!("Three-month period: {}", key);
        info!(
            "Period start date: {}, Period end date: {}",
            summary.start_date, summary.end_date
        );
        info!(
            "Start Date Open: {}, End Date Close: {}",
            summary.start_open, summary.end_close
        );
        info!("Percentage Change: {:.2}%", summary.percentage_change);

        let rows = table.rows_mut();
        for &index in &indices {
            let row = &mut rows[index];
            row.start_date = Some(summary.start_date);
            row.end_date = Some(summary.end_date);
            row.percentage_change = None;
        }
        if let Some(&last) = indices.last() {
            rows[last].percentage_change = Some(summary.percentage_change);
        }

        summaries.push(summary);
    }

    Ok(Aggregation { table, summaries })
}

/// Summarize one quarter's bars. `None` for an empty group.
fn summarize(key: QuarterKey, bars: &[&Bar]) -> Result<Option<PeriodSummary>, AnalysisError> {
    let Some((&first, rest)) = bars.split_first() else {
        return Ok(None);
    };

    // Strict comparisons keep the first row on timestamp ties.
    let (mut start, mut end) = (first, first);
    for &bar in rest {
        if bar.timestamp < start.timestamp {
            start = bar;
        }
        if bar.timestamp > end.timestamp {
            end = bar;
        }
    }

    let percentage_change = percentage_change(start.open, end.close)
        .ok_or(AnalysisError::ZeroBaseline { period: key })?;

    Ok(Some(PeriodSummary {
        key,
        start_date: start.timestamp,
        end_date: end.timestamp,
        start_open: start.open,
        end_close: end.close,
        percentage_change,
        bar_count: bars.len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use quarters_core::types::{Interval, PriceSeries, TableRow};
    use std::collections::BTreeSet;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn bar(ts: NaiveDateTime, open: f64, close: f64) -> Bar {
        Bar::new(ts, open, open.max(close) + 1.0, open.min(close) - 1.0, close, 1_000)
    }

    fn table(bars: Vec<Bar>) -> PriceTable {
        PriceTable::from_series(&PriceSeries::new("SNAP", Interval::Week1, bars).unwrap())
    }

    /// Weekly bars with a wavy price path.
    fn weekly(start: NaiveDateTime, weeks: usize) -> Vec<Bar> {
        (0..weeks)
            .map(|i| {
                let x = i as f64;
                let open = 50.0 + (x * 0.3).sin() * 10.0;
                let close = 50.0 + (x * 0.3 + 0.2).sin() * 10.0;
                bar(start + Duration::weeks(i as i64), open, close)
            })
            .collect()
    }

    #[test]
    fn test_single_quarter_fifty_percent() {
        let bars = vec![
            bar(at(2020, 1, 1), 10.0, 11.0),
            bar(at(2020, 2, 14), 11.0, 12.0),
            bar(at(2020, 3, 31), 12.0, 15.0),
        ];
        let result = aggregate(table(bars)).unwrap();

        assert_eq!(result.summaries.len(), 1);
        let summary = &result.summaries[0];
        assert_eq!(summary.key.to_string(), "2020.1");
        assert_eq!(summary.start_date, at(2020, 1, 1));
        assert_eq!(summary.end_date, at(2020, 3, 31));
        assert_eq!(summary.start_open, 10.0);
        assert_eq!(summary.end_close, 15.0);
        assert!((summary.percentage_change - 50.0).abs() < 1e-9);
        assert_eq!(summary.bar_count, 3);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(table(Vec::new())).unwrap();
        assert!(result.summaries.is_empty());
        assert!(result.table.is_empty());
    }

    #[test]
    fn test_single_bar_quarter() {
        let bars = vec![
            bar(at(2020, 3, 30), 30.0, 31.0),
            bar(at(2020, 4, 6), 20.0, 18.0),
        ];
        let result = aggregate(table(bars)).unwrap();

        let q2 = &result.summaries[1];
        assert_eq!(q2.key.to_string(), "2020.2");
        assert_eq!(q2.start_date, q2.end_date);
        assert!((q2.percentage_change - -10.0).abs() < 1e-9);
        assert_eq!(result.table.rows()[1].percentage_change, Some(q2.percentage_change));
    }

    #[test]
    fn test_zero_baseline_fails() {
        let bars = vec![
            bar(at(2020, 1, 6), 5.0, 6.0),
            bar(at(2020, 4, 6), 0.0, 1.0),
            bar(at(2020, 4, 13), 1.0, 2.0),
        ];
        let err = aggregate(table(bars)).unwrap_err();
        match err {
            AnalysisError::ZeroBaseline { period } => assert_eq!(period.to_string(), "2020.2"),
        }
    }

    #[test]
    fn test_zero_open_inside_quarter_is_fine() {
        let bars = vec![
            bar(at(2020, 1, 6), 5.0, 6.0),
            bar(at(2020, 1, 13), 0.0, 4.0),
        ];
        let result = aggregate(table(bars)).unwrap();
        assert!((result.summaries[0].percentage_change - -20.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_change_helper() {
        assert_eq!(percentage_change(0.0, 10.0), None);
        assert!((percentage_change(20.0, 18.0).unwrap() - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_count_matches_distinct_keys() {
        let bars = weekly(at(2017, 3, 6), 150);
        let distinct: BTreeSet<QuarterKey> =
            bars.iter().map(|b| QuarterKey::of(&b.timestamp)).collect();

        let result = aggregate(table(bars)).unwrap();
        assert_eq!(result.summaries.len(), distinct.len());
        let keys: Vec<QuarterKey> = result.summaries.iter().map(|s| s.key).collect();
        assert_eq!(keys, distinct.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_group_bounds_and_single_change_per_group() {
        let result = aggregate(table(weekly(at(2018, 1, 1), 120))).unwrap();

        for summary in &result.summaries {
            let rows: Vec<&TableRow> = result
                .table
                .rows()
                .iter()
                .filter(|r| r.quarter == Some(summary.key))
                .collect();

            assert_eq!(rows.len(), summary.bar_count);
            for row in &rows {
                assert!(summary.start_date <= row.bar.timestamp);
                assert!(row.bar.timestamp <= summary.end_date);
                assert_eq!(row.start_date, Some(summary.start_date));
                assert_eq!(row.end_date, Some(summary.end_date));
            }

            let with_change: Vec<&&TableRow> =
                rows.iter().filter(|r| r.percentage_change.is_some()).collect();
            assert_eq!(with_change.len(), 1);
            assert_eq!(with_change[0].bar.timestamp, summary.end_date);

            let start_bar = rows.iter().find(|r| r.bar.timestamp == summary.start_date).unwrap();
            let end_bar = rows.iter().find(|r| r.bar.timestamp == summary.end_date).unwrap();
            let expected = (end_bar.bar.close - start_bar.bar.open) / start_bar.bar.open * 100.0;
            assert!((summary.percentage_change - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_change_lands_on_last_position_not_latest_timestamp() {
        // Rows out of timestamp order within one quarter.
        let rows = vec![
            TableRow::new(bar(at(2020, 1, 6), 10.0, 10.5)),
            TableRow::new(bar(at(2020, 3, 30), 12.0, 9.0)),
            TableRow::new(bar(at(2020, 2, 3), 11.0, 11.5)),
        ];
        let result = aggregate(PriceTable::from_rows("SNAP", Interval::Week1, rows)).unwrap();

        let summary = &result.summaries[0];
        assert_eq!(summary.start_date, at(2020, 1, 6));
        assert_eq!(summary.end_date, at(2020, 3, 30));
        assert!((summary.percentage_change - -10.0).abs() < 1e-9);

        let changes: Vec<Option<f64>> = result
            .table
            .rows()
            .iter()
            .map(|r| r.percentage_change)
            .collect();
        assert_eq!(changes[0], None);
        assert_eq!(changes[1], None);
        assert!((changes[2].unwrap() - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_prior_change_values_are_overwritten() {
        let rows = vec![
            TableRow {
                percentage_change: Some(99.0),
                ..TableRow::new(bar(at(2021, 7, 5), 40.0, 41.0))
            },
            TableRow::new(bar(at(2021, 7, 12), 41.0, 44.0)),
        ];
        let result = aggregate(PriceTable::from_rows("SNAP", Interval::Week1, rows)).unwrap();
        assert_eq!(result.table.rows()[0].percentage_change, None);
        assert!((result.table.rows()[1].percentage_change.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_filter() {
        let bars = vec![
            bar(at(2020, 1, 6), 10.0, 12.0),
            bar(at(2020, 4, 6), 10.0, 8.0),
            bar(at(2020, 7, 6), 10.0, 10.0),
        ];
        let result = aggregate(table(bars)).unwrap();
        let negative: Vec<String> = result.negative().map(|s| s.key.to_string()).collect();
        assert_eq!(negative, vec!["2020.2"]);
    }
}
