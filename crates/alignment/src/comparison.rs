//! Side-by-side comparison of two intervals.

use serde::{Deserialize, Serialize};
use termperf_core::config::CurveConfig;
use termperf_core::{Interval, NormalizedPoint, PriceSeries, Result};

use crate::curve::{normalize, CurvePerformance};

/// Which intervals to compare by default, as indices into the interval list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonSelection {
    /// The ongoing interval, or the last one if none is ongoing.
    pub primary: usize,
    /// The interval just before the ongoing one.
    pub secondary: Option<usize>,
}

/// Pick the default pair to compare.
///
/// Returns `None` for an empty list.
pub fn default_comparison(intervals: &[Interval]) -> Option<ComparisonSelection> {
    match intervals.iter().position(|i| i.is_ongoing) {
        Some(current) => Some(ComparisonSelection {
            primary: current,
            secondary: current.checked_sub(1),
        }),
        None => intervals.len().checked_sub(1).map(|last| ComparisonSelection {
            primary: last,
            secondary: None,
        }),
    }
}

/// One side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    /// Interval label.
    pub label: String,
    /// Normalized curve.
    pub points: Vec<NormalizedPoint>,
    /// Change over the curve.
    pub performance: CurvePerformance,
}

impl CurveReport {
    fn build(series: &PriceSeries, interval: &Interval, config: &CurveConfig) -> Result<Self> {
        let curve = normalize(series, interval)?;
        Ok(Self {
            label: interval.label.clone(),
            points: curve.to_vec(),
            performance: curve.performance(config),
        })
    }
}

/// Curves for a primary interval and an optional secondary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Curve of the primary interval.
    pub primary: CurveReport,
    /// Curve of the secondary interval, when one was requested.
    pub secondary: Option<CurveReport>,
}

/// Build curves and performance for both sides.
pub fn compare(
    series: &PriceSeries,
    primary: &Interval,
    secondary: Option<&Interval>,
    config: &CurveConfig,
) -> Result<Comparison> {
    Ok(Comparison {
        primary: CurveReport::build(series, primary, config)?,
        secondary: secondary
            .map(|interval| CurveReport::build(series, interval, config))
            .transpose()?,
    })
}
