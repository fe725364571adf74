//! Candle classifier.

use quarters_core::types::{CandleType, PriceTable};

/// Label every row bullish or bearish.
pub fn classify(table: PriceTable) -> PriceTable {
    table.map_rows(|mut row| {
        row.candle_type = Some(CandleType::of(&row.bar));
        row
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use quarters_core::types::{Bar, Interval, PriceSeries};

    fn table(pairs: &[(f64, f64)]) -> PriceTable {
        let base = NaiveDate::from_ymd_opt(2020, 1, 6)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let bars = pairs
            .iter()
            .enumerate()
            .map(|(i, &(open, close))| {
                Bar::new(
                    base + Duration::days(i as i64),
                    open,
                    open.max(close),
                    open.min(close),
                    close,
                    100,
                )
            })
            .collect();
        PriceTable::from_series(&PriceSeries::new("SNAP", Interval::Day1, bars).unwrap())
    }

    #[test]
    fn test_classify_every_row() {
        let classified = classify(table(&[(10.0, 11.0), (11.0, 10.5), (10.5, 10.5)]));
        let labels: Vec<_> = classified.rows().iter().map(|r| r.candle_type).collect();
        assert_eq!(
            labels,
            vec![
                Some(CandleType::Bullish),
                Some(CandleType::Bearish),
                Some(CandleType::Bearish),
            ]
        );
    }

    #[test]
    fn test_bullish_iff_open_below_close() {
        let pairs: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let open = 20.0 + ((i * 7) % 11) as f64;
                let close = 20.0 + ((i * 5) % 11) as f64;
                (open, close)
            })
            .collect();
        let classified = classify(table(&pairs));
        for row in classified.rows() {
            let expected = if row.bar.open < row.bar.close {
                CandleType::Bullish
            } else {
                CandleType::Bearish
            };
            assert_eq!(row.candle_type, Some(expected));
        }
    }

    #[test]
    fn test_classify_empty_table() {
        assert!(classify(table(&[])).is_empty());
    }
}
