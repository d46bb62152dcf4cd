//! Core types and configuration for the term-performance engine.
//!
//! This crate provides shared types used across all other crates:
//! - Price series and interval types
//! - Derived curve and summary types
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
