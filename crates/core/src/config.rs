//! Configuration structures for the term-performance engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on rounding precision for curve performance.
const MAX_PERFORMANCE_DECIMALS: u32 = 10;

/// Main configuration for the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Curve (normalize) configuration.
    pub curve: CurveConfig,
    /// Ranking (summarize) configuration.
    pub ranking: RankingConfig,
    /// Data provider configuration.
    pub provider: ProviderConfig,
}

impl Config {
    /// Parse a configuration from JSON and validate it.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.curve.min_points < 1 {
            return Err(Error::config("curve.min_points must be at least 1"));
        }
        if self.curve.performance_decimals > MAX_PERFORMANCE_DECIMALS {
            return Err(Error::config(format!(
                "curve.performance_decimals must be <= {}, got {}",
                MAX_PERFORMANCE_DECIMALS, self.curve.performance_decimals
            )));
        }
        if self.provider.symbol.trim().is_empty() {
            return Err(Error::config("provider.symbol must not be empty"));
        }
        Ok(())
    }
}

/// Normalized curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Decimal places kept in curve performance figures.
    pub performance_decimals: u32,
    /// Minimum curve length for a non-zero curve performance.
    pub min_points: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            performance_decimals: 2,
            min_points: 2,
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Exclude intervals whose end close is not positive.
    pub require_positive_end: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            require_positive_end: true,
        }
    }
}

/// Data provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Symbol requested from the price series provider.
    pub symbol: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            symbol: "^GSPC".to_string(),
        }
    }
}
