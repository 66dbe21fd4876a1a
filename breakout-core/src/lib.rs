//! Breakout Core — volume/price breakout detection and forward-return analysis.
//!
//! This crate holds everything that decides a result:
//! - Domain types (bars, series, breakout events, trades, identifiers)
//! - Market data providers (Yahoo chart API, CSV import, synthetic)
//! - Indicators (trailing volume baseline, close-over-close change)
//! - The analysis engine: normalize, scan, simulate, aggregate
//!
//! Given the same records and parameters, a run is bit-identical.

pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod indicators;
pub mod params;

pub use engine::{analyze_series, run_analysis, AnalysisResult};
pub use error::AnalysisError;
pub use params::{AnalysisParams, AnalysisRequest, DateRange};
