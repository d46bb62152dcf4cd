//! Nearest-point lookup over a price series.
//!
//! Interval boundaries often land on weekends and holidays. The lookup
//! resolves a calendar date to the first trading day on or after it, and
//! only falls back to the latest earlier point when the date lies past the
//! end of the data.

use chrono::NaiveDate;
use termperf_core::{PricePoint, PriceSeries};

/// Resolves target dates to price points of one series.
#[derive(Debug, Clone, Copy)]
pub struct NearestPointLocator<'a> {
    series: &'a PriceSeries,
}

impl<'a> NearestPointLocator<'a> {
    /// Create a locator over `series`.
    pub fn new(series: &'a PriceSeries) -> Self {
        Self { series }
    }

    /// Find the point for `target`.
    ///
    /// Returns the earliest point dated on or after `target`; otherwise the
    /// latest point before it; `None` only for an empty series. An exact date
    /// match always wins.
    pub fn locate(&self, target: NaiveDate) -> Option<&'a PricePoint> {
        let points = self.series.points();
        // Binary search: first index whose date is >= target
        let idx = points.partition_point(|p| p.date < target);
        points.get(idx).or_else(|| points.last())
    }
}
