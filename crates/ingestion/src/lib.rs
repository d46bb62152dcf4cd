//! Data acquisition seams for the term-performance engine.
//!
//! This crate handles:
//! - Price series and interval provider traits
//! - In-memory providers for already-fetched data
//! - Lenient series building (sorting, de-duplication)
//! - Reading the JSON array layouts used by the data files

pub mod builder;
pub mod json;
pub mod provider;

pub use builder::{BuildStats, SeriesBuilder};
pub use provider::{InMemoryProvider, IntervalProvider, PriceSeriesProvider};
