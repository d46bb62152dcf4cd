//! Ranking for the term-performance engine.
//!
//! This crate provides:
//! - Boundary resolution for each interval
//! - Exclusion of intervals without computable performance
//! - Stable descending ranking by percent change
//! - An engine facade that pulls inputs from providers

pub mod engine;
pub mod summary;

pub use engine::{EngineReport, TermPerformanceEngine};
pub use summary::{summarize, ExcludedInterval, ExclusionReason, PerformanceRanker, SummaryReport};
