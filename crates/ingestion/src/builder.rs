//! Lenient price series construction.
//!
//! Raw feeds arrive out of order, repeat dates after a partial refresh, and
//! occasionally carry junk closes. The builder absorbs all of that and hands
//! back a series that satisfies the ordering invariant.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use termperf_core::{PricePoint, PriceSeries, Result};
use tracing::{debug, warn};

/// Statistics about series building.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Points offered to the builder.
    pub total_points: u64,
    /// Points that replaced an earlier point with the same date.
    pub duplicate_dates: u64,
    /// Points dropped for a NaN or infinite close.
    pub non_finite_closes: u64,
    /// Points dated earlier than the latest date added before them.
    pub out_of_order: u64,
}

impl BuildStats {
    /// Points that made it into the series.
    pub fn kept_points(&self) -> u64 {
        self.total_points - self.duplicate_dates - self.non_finite_closes
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Builder that sorts and de-duplicates raw price points.
///
/// For duplicate dates the last point added wins, matching a refresh that
/// appends newer values for days already on file.
#[derive(Debug, Default)]
pub struct SeriesBuilder {
    points: BTreeMap<NaiveDate, f64>,
    latest_date: Option<NaiveDate>,
    stats: BuildStats,
}

impl SeriesBuilder {
    /// Create a new series builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single point.
    pub fn add_point(&mut self, point: PricePoint) {
        self.stats.total_points += 1;

        if !point.close.is_finite() {
            self.stats.non_finite_closes += 1;
            warn!(date = %point.date, close = point.close, "dropping non-finite close");
            return;
        }

        match self.latest_date {
            Some(latest) if point.date < latest => self.stats.out_of_order += 1,
            _ => self.latest_date = Some(point.date),
        }

        if self.points.insert(point.date, point.close).is_some() {
            self.stats.duplicate_dates += 1;
        }
    }

    /// Add multiple points.
    pub fn add_points<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = PricePoint>,
    {
        for point in points {
            self.add_point(point);
        }
    }

    /// Number of distinct dates held.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no point has been kept.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get build statistics.
    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Produce the ordered series.
    pub fn build(&self) -> Result<PriceSeries> {
        debug!(
            total = self.stats.total_points,
            kept = self.points.len(),
            duplicates = self.stats.duplicate_dates,
            out_of_order = self.stats.out_of_order,
            "built price series"
        );
        PriceSeries::new(
            self.points
                .iter()
                .map(|(&date, &close)| PricePoint::new(date, close))
                .collect(),
        )
    }
}
