//! Report runner — wires together config, data loading, engine, and histogram.
//!
//! Two entry points:
//! - `run_report()`: validates the config, loads data through a provider, runs. Used by CLI.
//! - `run_report_from_series()`: takes a pre-loaded series. No I/O.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use breakout_core::data::{DataProvider, DataSource};
use breakout_core::domain::DatasetHash;
use breakout_core::{analyze_series, AnalysisError, AnalysisParams, AnalysisRequest, AnalysisResult};

use crate::config::{AnalysisConfig, ConfigError};
use crate::data_loader::{load_series, LoadError, LoadedSeries};
use crate::histogram::{Histogram, DEFAULT_BINS};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete, self-describing result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub params: AnalysisParams,
    pub dataset_hash: DatasetHash,
    pub source: DataSource,
    pub is_synthetic: bool,
    pub result: AnalysisResult,
    pub histogram: Histogram,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run one analysis end to end.
///
/// Config and parameters are validated before the provider is touched.
pub fn run_report(
    config: &AnalysisConfig,
    provider: &dyn DataProvider,
) -> Result<AnalysisReport, RunError> {
    config.validate()?;
    let request = config.to_request();
    request.params.validate()?;
    request.range.validate()?;

    let loaded = load_series(provider, &request)?;
    run_report_from_series(&loaded, &request)
}

/// Run one analysis on a pre-loaded series — no I/O.
pub fn run_report_from_series(
    loaded: &LoadedSeries,
    request: &AnalysisRequest,
) -> Result<AnalysisReport, RunError> {
    let mut result = analyze_series(&loaded.series, &request.params)?;
    result.data_quality = Some(loaded.report);

    let excluded = result.excluded_events();
    if excluded > 0 {
        warn!(
            symbol = %request.symbol,
            insufficient_forward_data = result.exclusions.insufficient_forward_data,
            zero_entry_price = result.exclusions.zero_entry_price,
            "{excluded} breakout event(s) excluded from the trade set"
        );
    }
    info!(
        symbol = %request.symbol,
        events = result.events.len(),
        trades = result.count,
        run_id = result.run_id.short(),
        "analysis finished"
    );

    let histogram = Histogram::from_values(&result.returns, DEFAULT_BINS);

    Ok(AnalysisReport {
        schema_version: SCHEMA_VERSION,
        symbol: request.symbol.clone(),
        start_date: request.range.start,
        end_date: request.range.end,
        params: request.params,
        dataset_hash: loaded.dataset_hash.clone(),
        source: loaded.source,
        is_synthetic: loaded.is_synthetic,
        result,
        histogram,
    })
}
