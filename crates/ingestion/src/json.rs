//! Readers for the JSON array layouts of the price and interval files.
//!
//! Prices are `[{"date": "YYYY-MM-DD", "close": 1234.56}, ...]`, intervals
//! are `[{"name": ..., "start": ..., "end": ..., "isCurrent": ...}, ...]`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use termperf_core::{Interval, PricePoint, PriceSeries, Result};
use tracing::debug;

use crate::builder::{BuildStats, SeriesBuilder};
use crate::provider::InMemoryProvider;

/// Read a price series, sorting and de-duplicating as needed.
pub fn read_series<R: Read>(reader: R) -> Result<(PriceSeries, BuildStats)> {
    let raw: Vec<PricePoint> = serde_json::from_reader(reader)?;
    let mut builder = SeriesBuilder::new();
    builder.add_points(raw);
    let series = builder.build()?;
    Ok((series, builder.stats().clone()))
}

/// Read and validate an interval list.
pub fn read_intervals<R: Read>(reader: R) -> Result<Vec<Interval>> {
    let intervals: Vec<Interval> = serde_json::from_reader(reader)?;
    for interval in &intervals {
        interval.validate()?;
    }
    debug!(count = intervals.len(), "read intervals");
    Ok(intervals)
}

/// Load both files into an in-memory provider keyed by `symbol`.
pub fn load_provider(
    symbol: &str,
    series_path: impl AsRef<Path>,
    intervals_path: impl AsRef<Path>,
) -> Result<InMemoryProvider> {
    let (series, stats) = read_series(BufReader::new(File::open(series_path)?))?;
    let intervals = read_intervals(BufReader::new(File::open(intervals_path)?))?;
    debug!(symbol, points = series.len(), dropped = stats.non_finite_closes, "loaded provider");
    Ok(InMemoryProvider::new()
        .with_series(symbol, series)
        .with_intervals(intervals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{IntervalProvider, PriceSeriesProvider};
    use termperf_core::Error;

    const PRICES: &str = r#"[
        {"date": "2020-01-01", "close": 100.0},
        {"date": "2020-06-01", "close": 120.0},
        {"date": "2020-01-03", "close": 110.0}
    ]"#;

    const TERMS: &str = r#"[
        {"name": "A", "start": "2020-01-01", "end": "2020-06-01", "isCurrent": false},
        {"name": "B", "start": "2020-06-01", "end": "", "isCurrent": true}
    ]"#;

    #[test]
    fn test_read_series_sorts() {
        let (series, stats) = read_series(PRICES.as_bytes()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last().unwrap().date.to_string(), "2020-06-01");
        assert_eq!(stats.out_of_order, 1);
    }

    #[test]
    fn test_read_intervals() {
        let intervals = read_intervals(TERMS.as_bytes()).unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].label, "A");
        assert!(intervals[1].is_ongoing);
    }

    #[test]
    fn test_read_intervals_rejects_inverted() {
        let json = r#"[{"name": "X", "start": "2020-06-01", "end": "2020-01-01", "isCurrent": false}]"#;
        let err = read_intervals(json.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval(_)));
    }

    #[test]
    fn test_read_intervals_rejects_closed_without_end() {
        let blank = r#"[{"name": "Closed", "start": "2020-01-01", "end": "", "isCurrent": false}]"#;
        let err = read_intervals(blank.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval(_)));

        let missing = r#"[{"name": "NoEnd", "start": "2020-01-01", "isCurrent": false}]"#;
        let err = read_intervals(missing.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidInterval(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = read_series("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_provider_from_files() {
        let dir = std::env::temp_dir().join(format!("termperf-json-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let prices = dir.join("prices.json");
        let terms = dir.join("terms.json");
        std::fs::write(&prices, PRICES).unwrap();
        std::fs::write(&terms, TERMS).unwrap();

        let provider = load_provider("^GSPC", &prices, &terms).unwrap();
        assert_eq!(provider.price_series("^GSPC").unwrap().len(), 3);
        assert_eq!(provider.intervals().unwrap().len(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_provider_missing_file() {
        let err = load_provider("^GSPC", "/nonexistent/prices.json", "/nonexistent/terms.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
