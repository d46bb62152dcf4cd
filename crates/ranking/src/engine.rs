//! Engine facade.
//!
//! Pulls the price series and interval list from providers, then runs the
//! pure ranking and curve steps. Nothing is cached between runs.

use serde::{Deserialize, Serialize};
use termperf_alignment::{compare, default_comparison, normalize_all, Comparison, LabeledCurve};
use termperf_core::{Config, Result};
use termperf_ingestion::{IntervalProvider, PriceSeriesProvider};
use tracing::{debug, info};

use crate::summary::{PerformanceRanker, SummaryReport};

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Symbol the series was requested for.
    pub symbol: String,
    /// Ranked summaries and exclusions.
    pub summary: SummaryReport,
    /// One curve per interval, in input order.
    pub curves: Vec<LabeledCurve>,
    /// Default comparison (ongoing interval against its predecessor).
    pub comparison: Option<Comparison>,
}

/// Runs the engine against a pair of providers.
pub struct TermPerformanceEngine<P, I> {
    prices: P,
    intervals: I,
    config: Config,
    ranker: PerformanceRanker,
}

impl<P, I> TermPerformanceEngine<P, I>
where
    P: PriceSeriesProvider,
    I: IntervalProvider,
{
    /// Create a new engine. The configuration is validated here.
    pub fn new(prices: P, intervals: I, config: Config) -> Result<Self> {
        config.validate()?;
        let ranker = PerformanceRanker::new(config.ranking.clone());
        Ok(Self {
            prices,
            intervals,
            config,
            ranker,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch inputs and compute the full report.
    pub fn run(&self) -> Result<EngineReport> {
        let symbol = self.config.provider.symbol.as_str();
        let series = self.prices.price_series(symbol)?;
        let intervals = self.intervals.intervals()?;
        debug!(symbol, points = series.len(), intervals = intervals.len(), "engine inputs");

        let summary = self.ranker.report(&series, &intervals)?;
        let curves = normalize_all(&series, &intervals)?;
        let comparison = default_comparison(&intervals)
            .map(|sel| {
                let secondary = sel.secondary.map(|i| &intervals[i]);
                compare(&series, &intervals[sel.primary], secondary, &self.config.curve)
            })
            .transpose()?;

        info!(
            symbol,
            ranked = summary.ranked.len(),
            excluded = summary.excluded.len(),
            "term performance computed"
        );

        Ok(EngineReport {
            symbol: symbol.to_string(),
            summary,
            curves,
            comparison,
        })
    }
}
