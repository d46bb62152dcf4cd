//! Core data types for the term-performance engine.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Percent change from `from` to `to`.
///
/// Returns `None` when `from` is not positive: the change is not computable,
/// which is different from a genuine zero return.
#[inline]
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from > 0.0 {
        Some((to - from) / from * 100.0)
    } else {
        None
    }
}

/// A single daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Create a new price point.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Chronologically ordered price series with unique dates.
///
/// The ordering invariant is checked on construction, so lookups can
/// binary search instead of scanning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points that are already sorted.
    ///
    /// Fails when dates are not strictly ascending or a close is not finite.
    /// Non-positive closes are accepted; they are excluded later as
    /// non-computable.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(Error::invalid_series(format!(
                    "non-finite close {} on {}",
                    point.close, point.date
                )));
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(Error::invalid_series(format!(
                    "dates must be strictly ascending: {} followed by {}",
                    points[i - 1].date, point.date
                )));
            }
        }
        Ok(Self { points })
    }

    /// An empty series.
    pub fn empty() -> Self {
        Self::default()
    }

    /// All points in date order.
    #[inline]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest point.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Latest point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Latest date present in the series.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|p| p.date)
    }

    /// Points with `start <= date <= end`; no upper filter when `end` is `None`.
    pub fn range(&self, start: NaiveDate, end: Option<NaiveDate>) -> &[PricePoint] {
        let lo = self.points.partition_point(|p| p.date < start);
        let hi = match end {
            Some(end) => self.points.partition_point(|p| p.date <= end),
            None => self.points.len(),
        };
        if lo >= hi {
            &[]
        } else {
            &self.points[lo..hi]
        }
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = Error;

    fn try_from(points: Vec<PricePoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// A labeled date range, e.g. a presidential term.
///
/// Accepts both `label`/`isOngoing` and the `name`/`isCurrent` field names.
/// For an ongoing interval `end` is only a placeholder: the boundary resolves
/// to the latest date in the price series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// Display label.
    #[serde(alias = "name")]
    pub label: String,
    /// First day of the interval.
    pub start: NaiveDate,
    /// Last day of the interval (placeholder when ongoing).
    #[serde(default = "open_end", deserialize_with = "lenient_end")]
    pub end: NaiveDate,
    /// Whether the interval is still running.
    #[serde(default, alias = "isCurrent")]
    pub is_ongoing: bool,
}

fn open_end() -> NaiveDate {
    NaiveDate::MAX
}

/// Ongoing terms are sometimes stored with an empty or null end date.
fn lenient_end<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(open_end()),
        Some(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

impl Interval {
    /// Create a closed interval.
    pub fn new(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end,
            is_ongoing: false,
        }
    }

    /// Create an ongoing interval with no fixed end.
    pub fn ongoing(label: impl Into<String>, start: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start,
            end: open_end(),
            is_ongoing: true,
        }
    }

    /// Reject closed intervals without an end date or that end before they start.
    pub fn validate(&self) -> Result<()> {
        if !self.is_ongoing && self.end == open_end() {
            return Err(Error::invalid_interval(format!(
                "'{}' is not ongoing but has no end date",
                self.label
            )));
        }
        if !self.is_ongoing && self.start > self.end {
            return Err(Error::invalid_interval(format!(
                "'{}' starts {} after it ends {}",
                self.label, self.start, self.end
            )));
        }
        Ok(())
    }

    /// Upper date filter for curve data; `None` for ongoing intervals.
    #[inline]
    pub fn upper_bound(&self) -> Option<NaiveDate> {
        if self.is_ongoing {
            None
        } else {
            Some(self.end)
        }
    }

    /// The end boundary used for summaries.
    ///
    /// Ongoing intervals end at the latest series date, which is `None`
    /// for an empty series.
    pub fn effective_end(&self, series: &PriceSeries) -> Option<NaiveDate> {
        if self.is_ongoing {
            series.last_date()
        } else {
            Some(self.end)
        }
    }
}

/// A price point re-expressed relative to its interval's start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
    /// Calendar days since the interval start.
    pub offset_days: i64,
    /// Close minus the curve's base close.
    pub delta_close: f64,
    /// Delta as a percentage of the base close.
    pub percent_change: f64,
}

/// Aggregate performance of one interval, with its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// Interval label.
    pub label: String,
    /// Interval start date.
    pub term_start: NaiveDate,
    /// Resolved end date (latest series date for ongoing intervals).
    pub term_end: NaiveDate,
    /// Close at the start boundary.
    pub start_close: f64,
    /// Close at the end boundary.
    pub end_close: f64,
    /// Percent change from start to end.
    pub percent_change: f64,
    /// 1-based position in descending percent-change order.
    pub rank: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        PriceSeries::new(points.iter().map(|(s, c)| PricePoint::new(d(s), *c)).collect()).unwrap()
    }

    #[test]
    fn test_percent_change() {
        assert!((percent_change(100.0, 120.0).unwrap() - 20.0).abs() < 1e-10);
        assert!((percent_change(100.0, 80.0).unwrap() + 20.0).abs() < 1e-10);
        assert_eq!(percent_change(0.0, 120.0), None);
        assert_eq!(percent_change(-5.0, 120.0), None);
    }

    #[test]
    fn test_series_rejects_unordered_dates() {
        let points = vec![
            PricePoint::new(d("2020-01-03"), 110.0),
            PricePoint::new(d("2020-01-01"), 100.0),
        ];
        let err = PriceSeries::new(points).unwrap_err();
        assert!(matches!(err, Error::InvalidSeries(_)));
    }

    #[test]
    fn test_series_rejects_duplicate_dates() {
        let points = vec![
            PricePoint::new(d("2020-01-01"), 100.0),
            PricePoint::new(d("2020-01-01"), 101.0),
        ];
        assert!(PriceSeries::new(points).is_err());
    }

    #[test]
    fn test_series_rejects_non_finite_close() {
        let points = vec![PricePoint::new(d("2020-01-01"), f64::NAN)];
        assert!(PriceSeries::new(points).is_err());
    }

    #[test]
    fn test_series_range() {
        let s = series(&[("2020-01-01", 100.0), ("2020-01-03", 110.0), ("2020-06-01", 120.0)]);

        assert_eq!(s.range(d("2020-01-02"), Some(d("2020-06-01"))).len(), 2);
        assert_eq!(s.range(d("2020-01-01"), None).len(), 3);
        assert!(s.range(d("2021-01-01"), Some(d("2021-12-31"))).is_empty());
        assert!(s.range(d("2020-01-04"), Some(d("2020-01-02"))).is_empty());
    }

    #[test]
    fn test_series_deserialize_validates() {
        let ok: PriceSeries =
            serde_json::from_str(r#"[{"date":"2020-01-01","close":100.0},{"date":"2020-01-03","close":110.0}]"#)
                .unwrap();
        assert_eq!(ok.len(), 2);

        let bad = serde_json::from_str::<PriceSeries>(
            r#"[{"date":"2020-01-03","close":110.0},{"date":"2020-01-01","close":100.0}]"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_interval_deserialize_aliases() {
        let interval: Interval = serde_json::from_str(
            r#"{"name":"Obama","start":"2009-01-20","end":"2017-01-20","isCurrent":false}"#,
        )
        .unwrap();
        assert_eq!(interval.label, "Obama");
        assert_eq!(interval.end, d("2017-01-20"));
        assert!(!interval.is_ongoing);

        let current: Interval =
            serde_json::from_str(r#"{"label":"Current","start":"2025-01-20","end":"","isOngoing":true}"#)
                .unwrap();
        assert!(current.is_ongoing);
        assert_eq!(current.upper_bound(), None);
    }

    #[test]
    fn test_interval_validate() {
        assert!(Interval::new("A", d("2020-01-01"), d("2020-06-01")).validate().is_ok());
        assert!(Interval::new("A", d("2020-01-01"), d("2020-01-01")).validate().is_ok());

        let err = Interval::new("B", d("2020-06-01"), d("2020-01-01")).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidInterval(_)));

        let mut ongoing = Interval::ongoing("C", d("2020-06-01"));
        ongoing.end = d("2020-01-01");
        assert!(ongoing.validate().is_ok());
    }

    #[test]
    fn test_closed_interval_without_end_rejected() {
        let blank: Interval =
            serde_json::from_str(r#"{"name":"Closed","start":"2020-01-01","end":"","isCurrent":false}"#).unwrap();
        let missing: Interval =
            serde_json::from_str(r#"{"name":"NoEnd","start":"2020-01-01","isCurrent":false}"#).unwrap();
        let null: Interval =
            serde_json::from_str(r#"{"name":"Null","start":"2020-01-01","end":null,"isCurrent":false}"#).unwrap();

        for interval in [blank, missing, null] {
            let err = interval.validate().unwrap_err();
            assert!(matches!(err, Error::InvalidInterval(_)), "{}", interval.label);
        }
    }

    #[test]
    fn test_effective_end() {
        let s = series(&[("2020-01-01", 100.0), ("2020-06-01", 120.0)]);

        let closed = Interval::new("A", d("2020-01-01"), d("2020-03-01"));
        assert_eq!(closed.effective_end(&s), Some(d("2020-03-01")));

        let ongoing = Interval::ongoing("B", d("2020-01-01"));
        assert_eq!(ongoing.effective_end(&s), Some(d("2020-06-01")));
        assert_eq!(ongoing.effective_end(&PriceSeries::empty()), None);
    }
}
