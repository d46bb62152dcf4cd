//! Provider interfaces for the engine's two inputs.
//!
//! The engine never fetches anything itself. Hosts implement these traits
//! over whatever storage or market-data client they own.

use std::collections::HashMap;
use termperf_core::{Error, Interval, PriceSeries, Result};

/// Supplies an ordered, de-duplicated price series for a symbol.
pub trait PriceSeriesProvider {
    /// Price series for `symbol`.
    fn price_series(&self, symbol: &str) -> Result<PriceSeries>;
}

/// Supplies the list of intervals to measure.
pub trait IntervalProvider {
    /// Intervals in their canonical (display) order.
    fn intervals(&self) -> Result<Vec<Interval>>;
}

impl<P: PriceSeriesProvider + ?Sized> PriceSeriesProvider for &P {
    fn price_series(&self, symbol: &str) -> Result<PriceSeries> {
        (**self).price_series(symbol)
    }
}

impl<P: IntervalProvider + ?Sized> IntervalProvider for &P {
    fn intervals(&self) -> Result<Vec<Interval>> {
        (**self).intervals()
    }
}

/// Provider over already-fetched, immutable data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: HashMap<String, PriceSeries>,
    intervals: Vec<Interval>,
}

impl InMemoryProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the series for a symbol, replacing any earlier one.
    pub fn with_series(mut self, symbol: impl Into<String>, series: PriceSeries) -> Self {
        self.series.insert(symbol.into(), series);
        self
    }

    /// Set the interval list.
    pub fn with_intervals(mut self, intervals: Vec<Interval>) -> Self {
        self.intervals = intervals;
        self
    }

    /// Symbols with a registered series.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

impl PriceSeriesProvider for InMemoryProvider {
    fn price_series(&self, symbol: &str) -> Result<PriceSeries> {
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| Error::provider(format!("no price series for symbol '{}'", symbol)))
    }
}

impl IntervalProvider for InMemoryProvider {
    fn intervals(&self) -> Result<Vec<Interval>> {
        Ok(self.intervals.clone())
    }
}
