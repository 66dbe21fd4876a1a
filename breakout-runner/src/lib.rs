//! Breakout Runner — analysis orchestration on top of `breakout-core`.
//!
//! This crate provides:
//! - TOML configuration with defaults and validation
//! - Data loading through a configured provider with warmup padding
//! - Single-run reports with return histograms
//! - Parallel parameter sweeps over one loaded series
//! - JSON, CSV, and Markdown artifact export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod histogram;
pub mod runner;
pub mod sweep;

pub use config::{default_warmup_days, is_ticker_char, AnalysisConfig, ConfigError, SourceKind};
pub use data_loader::{load_series, provider_for, LoadError, LoadedSeries};
pub use histogram::{Bin, Histogram, DEFAULT_BINS};
pub use runner::{run_report, run_report_from_series, AnalysisReport, RunError, SCHEMA_VERSION};
pub use sweep::{best_by_mean_return, run_sweep, ParamGrid, SweepRow};
