//! Normalized performance curves.
//!
//! A curve re-expresses every close inside an interval relative to the
//! first close in that interval, keyed by calendar days since the interval
//! start. Curves borrow the series and are computed lazily on iteration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use termperf_core::config::CurveConfig;
use termperf_core::{percent_change, Interval, NormalizedPoint, PricePoint, PriceSeries, Result};
use tracing::debug;

/// Lazy normalized view of one interval over a price series.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedCurve<'a> {
    start: NaiveDate,
    base_close: f64,
    points: &'a [PricePoint],
}

impl<'a> NormalizedCurve<'a> {
    /// Base close the curve is measured against (0 for an empty curve).
    pub fn base_close(&self) -> f64 {
        self.base_close
    }

    /// Number of points in the curve.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no price falls inside the interval.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the curve in ascending date order. Can be called repeatedly.
    pub fn iter(&self) -> NormalizedIter<'a> {
        NormalizedIter {
            start: self.start,
            base_close: self.base_close,
            inner: self.points.iter(),
        }
    }

    /// Materialize the curve.
    pub fn to_vec(&self) -> Vec<NormalizedPoint> {
        self.iter().collect()
    }

    /// Price and percent change from the first to the last point.
    pub fn performance(&self, config: &CurveConfig) -> CurvePerformance {
        CurvePerformance::from_points(self.points, config)
    }
}

impl<'a> IntoIterator for &NormalizedCurve<'a> {
    type Item = NormalizedPoint;
    type IntoIter = NormalizedIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`NormalizedCurve`].
#[derive(Debug, Clone)]
pub struct NormalizedIter<'a> {
    start: NaiveDate,
    base_close: f64,
    inner: std::slice::Iter<'a, PricePoint>,
}

impl NormalizedIter<'_> {
    fn normalize(&self, point: &PricePoint) -> NormalizedPoint {
        let delta_close = point.close - self.base_close;
        // Zero base floors the percentage instead of producing inf/NaN
        let percent_change = if self.base_close == 0.0 {
            0.0
        } else {
            delta_close / self.base_close * 100.0
        };
        NormalizedPoint {
            date: point.date,
            close: point.close,
            offset_days: (point.date - self.start).num_days(),
            delta_close,
            percent_change,
        }
    }
}

impl Iterator for NormalizedIter<'_> {
    type Item = NormalizedPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let point = self.inner.next()?;
        Some(self.normalize(point))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NormalizedIter<'_> {}

/// Normalize `series` against `interval`.
///
/// Keeps points with `start <= date <= end` (no upper bound for ongoing
/// intervals). An interval with no prices yields an empty curve. Fails only
/// for a closed interval whose start is after its end.
pub fn normalize<'a>(series: &'a PriceSeries, interval: &Interval) -> Result<NormalizedCurve<'a>> {
    interval.validate()?;
    let points = series.range(interval.start, interval.upper_bound());
    let base_close = points.first().map(|p| p.close).unwrap_or(0.0);
    Ok(NormalizedCurve {
        start: interval.start,
        base_close,
        points,
    })
}

/// A materialized curve tagged with its interval label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledCurve {
    /// Interval label.
    pub label: String,
    /// Curve points in date order.
    pub points: Vec<NormalizedPoint>,
}

/// Normalize every interval, in input order.
///
/// All intervals are validated before any curve is built.
pub fn normalize_all(series: &PriceSeries, intervals: &[Interval]) -> Result<Vec<LabeledCurve>> {
    for interval in intervals {
        interval.validate()?;
    }
    let curves = intervals
        .iter()
        .map(|interval| {
            let curve = normalize(series, interval)?;
            if curve.is_empty() {
                debug!(label = %interval.label, "no prices inside interval");
            }
            Ok(LabeledCurve {
                label: interval.label.clone(),
                points: curve.to_vec(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(curves)
}

/// Change over a whole curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePerformance {
    /// Last close minus first close.
    pub price_change: f64,
    /// Price change as a percentage of the first close.
    pub percent_change: f64,
}

impl CurvePerformance {
    /// Compute from curve prices.
    ///
    /// Curves shorter than `config.min_points` report zero change. Figures
    /// are rounded to `config.performance_decimals` places.
    pub fn from_points(points: &[PricePoint], config: &CurveConfig) -> Self {
        if points.len() < config.min_points.max(1) {
            return Self::default();
        }
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.close, last.close),
            _ => return Self::default(),
        };
        let decimals = config.performance_decimals;
        Self {
            price_change: round_to(last - first, decimals),
            percent_change: round_to(percent_change(first, last).unwrap_or(0.0), decimals),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
