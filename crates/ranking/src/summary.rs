//! Per-interval performance summaries and ranking.
//!
//! Each interval's start and end are resolved to prices with the nearest
//! point lookup. Intervals whose change cannot be computed are set aside
//! with a reason; the rest are sorted by percent change, best first, and
//! numbered from 1.

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use termperf_alignment::NearestPointLocator;
use termperf_core::config::RankingConfig;
use termperf_core::{percent_change, Interval, PerformanceSummary, PriceSeries, Result};
use tracing::debug;

/// Why an interval was left out of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExclusionReason {
    /// The series has no price inside the interval (e.g. a future term).
    NoPricesInRange,
    /// Start close is zero or negative; the change is not computable.
    NonPositiveStart,
    /// End close is zero or negative.
    NonPositiveEnd,
}

/// An interval that did not make it into the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedInterval {
    /// Interval label.
    pub label: String,
    /// Position in the input interval list.
    pub index: usize,
    /// Why it was excluded.
    pub reason: ExclusionReason,
}

/// Ranked summaries plus the intervals that were set aside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// Summaries ordered by rank.
    pub ranked: Vec<PerformanceSummary>,
    /// Excluded intervals in input order.
    pub excluded: Vec<ExcludedInterval>,
}

/// Summarizes and ranks intervals over a price series.
#[derive(Debug, Clone, Default)]
pub struct PerformanceRanker {
    config: RankingConfig,
}

impl PerformanceRanker {
    /// Create a new ranker.
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    /// Ranked summaries only.
    pub fn summarize(&self, series: &PriceSeries, intervals: &[Interval]) -> Result<Vec<PerformanceSummary>> {
        Ok(self.report(series, intervals)?.ranked)
    }

    /// Ranked summaries and exclusions.
    ///
    /// Every interval is validated first; a closed interval that ends before
    /// it starts fails the whole call.
    pub fn report(&self, series: &PriceSeries, intervals: &[Interval]) -> Result<SummaryReport> {
        for interval in intervals {
            interval.validate()?;
        }

        let locator = NearestPointLocator::new(series);
        let mut ranked = Vec::with_capacity(intervals.len());
        let mut excluded = Vec::new();

        for (index, interval) in intervals.iter().enumerate() {
            match self.evaluate(series, &locator, interval) {
                Ok(summary) => ranked.push(summary),
                Err(reason) => {
                    debug!(label = %interval.label, ?reason, "interval excluded from ranking");
                    excluded.push(ExcludedInterval {
                        label: interval.label.clone(),
                        index,
                        reason,
                    });
                }
            }
        }

        // Stable sort: equal changes keep input order
        ranked.sort_by_key(|s| std::cmp::Reverse(OrderedFloat(s.percent_change)));
        for (position, summary) in ranked.iter_mut().enumerate() {
            summary.rank = position as u32 + 1;
        }

        Ok(SummaryReport { ranked, excluded })
    }

    fn evaluate(
        &self,
        series: &PriceSeries,
        locator: &NearestPointLocator<'_>,
        interval: &Interval,
    ) -> std::result::Result<PerformanceSummary, ExclusionReason> {
        let term_end = interval.effective_end(series);
        if !has_prices_between(series, interval.start, term_end) {
            return Err(ExclusionReason::NoPricesInRange);
        }

        let start = locator
            .locate(interval.start)
            .ok_or(ExclusionReason::NoPricesInRange)?;
        let (term_end, end) = term_end
            .and_then(|date| locator.locate(date).map(|p| (date, p)))
            .ok_or(ExclusionReason::NoPricesInRange)?;

        let change = percent_change(start.close, end.close).ok_or(ExclusionReason::NonPositiveStart)?;
        if self.config.require_positive_end && end.close <= 0.0 {
            return Err(ExclusionReason::NonPositiveEnd);
        }

        Ok(PerformanceSummary {
            label: interval.label.clone(),
            term_start: interval.start,
            term_end,
            start_close: start.close,
            end_close: end.close,
            percent_change: change,
            rank: 0,
        })
    }
}

fn has_prices_between(series: &PriceSeries, start: NaiveDate, end: Option<NaiveDate>) -> bool {
    match end {
        Some(end) => !series.range(start, Some(end)).is_empty(),
        None => false,
    }
}

/// Summarize and rank with the default configuration.
pub fn summarize(series: &PriceSeries, intervals: &[Interval]) -> Result<Vec<PerformanceSummary>> {
    PerformanceRanker::default().summarize(series, intervals)
}
