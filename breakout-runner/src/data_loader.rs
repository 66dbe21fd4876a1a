//! Bar loading for the runner.
//!
//! Resolves the configured provider, fetches `[start - warmup, end]`, and hands
//! the records to the core normalizer. Synthetic data is a developer-only mode:
//! it is logged loudly and every result built on it carries the synthetic flag.

use thiserror::Error;
use tracing::{debug, info, warn};

use breakout_core::data::{
    CsvProvider, DataError, DataProvider, DataSource, SyntheticProvider, YahooProvider,
};
use breakout_core::domain::{DatasetHash, Series};
use breakout_core::engine::{normalize, NormalizeReport};
use breakout_core::fingerprint;
use breakout_core::{AnalysisError, AnalysisRequest};

use crate::config::{AnalysisConfig, ConfigError, SourceKind};

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data provider '{provider}' is not available")]
    Unavailable { provider: String },

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A normalized series plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub series: Series,
    pub report: NormalizeReport,
    pub source: DataSource,
    /// BLAKE3 over the normalized bars.
    pub dataset_hash: DatasetHash,
    pub is_synthetic: bool,
}

/// Build the provider named by the config's `[data]` table.
pub fn provider_for(config: &AnalysisConfig) -> Result<Box<dyn DataProvider>, LoadError> {
    let provider: Box<dyn DataProvider> = match config.source()? {
        SourceKind::Yahoo => Box::new(YahooProvider::new()?),
        SourceKind::Synthetic => Box::new(SyntheticProvider::new()),
        SourceKind::Csv => {
            let path = config.data.csv_path.clone().ok_or_else(|| {
                ConfigError::Invalid("data.csv_path is required for the csv source".into())
            })?;
            Box::new(CsvProvider::new(path))
        }
    };
    Ok(provider)
}

/// Fetch and normalize the bars for one request.
pub fn load_series(
    provider: &dyn DataProvider,
    request: &AnalysisRequest,
) -> Result<LoadedSeries, LoadError> {
    if !provider.is_available() {
        return Err(LoadError::Unavailable {
            provider: provider.name().to_string(),
        });
    }

    let fetch_start = request.range.warmup_start();
    info!(
        symbol = %request.symbol,
        provider = provider.name(),
        from = %fetch_start,
        to = %request.range.end,
        "fetching bars"
    );
    let fetched = provider.fetch(&request.symbol, fetch_start, request.range.end)?;
    let is_synthetic = fetched.source.is_synthetic();
    if is_synthetic {
        warn!(symbol = %request.symbol, "results are built on SYNTHETIC data");
    }

    let normalized = normalize(
        &request.symbol,
        fetched.bars,
        &request.range,
        request.params.baseline_window,
    )?;

    if normalized.series.warmup_len() < request.params.baseline_window {
        debug!(
            symbol = %request.symbol,
            warmup_bars = normalized.series.warmup_len(),
            baseline_window = request.params.baseline_window,
            "warmup shorter than baseline window"
        );
    }

    let dataset_hash = fingerprint::dataset_hash(&normalized.series);
    Ok(LoadedSeries {
        series: normalized.series,
        report: normalized.report,
        source: fetched.source,
        dataset_hash,
        is_synthetic,
    })
}
