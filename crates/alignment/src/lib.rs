//! Curve alignment for the term-performance engine.
//!
//! This crate handles:
//! - Nearest-point lookup with forward-biased tie-breaking
//! - Normalizing a price series against an interval's start
//! - Curve performance figures
//! - Side-by-side comparison of two intervals

pub mod comparison;
pub mod curve;
pub mod locator;

pub use comparison::{compare, default_comparison, Comparison, ComparisonSelection, CurveReport};
pub use curve::{normalize, normalize_all, CurvePerformance, LabeledCurve, NormalizedCurve, NormalizedIter};
pub use locator::NearestPointLocator;
