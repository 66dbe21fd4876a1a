//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV import,
//! synthetic generation) so the engine never knows where bars came from and tests
//! can swap in fixtures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily record from a data provider (before normalization).
///
/// `close` follows the adjusted-close convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

impl RawBar {
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }
}

/// Structured error types for data operations.
///
/// These are designed to be displayable directly by the CLI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("CSV error in {path}: {reason}")]
    Csv { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

impl DataSource {
    pub fn is_synthetic(self) -> bool {
        matches!(self, Self::Synthetic)
    }
}

/// Trait for data providers (Yahoo Finance, CSV import, etc).
///
/// Implementations return records in whatever order the source yields them;
/// ordering and duplicate handling belong to the normalizer.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily bars for a symbol over an inclusive date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Check if the provider is currently usable.
    fn is_available(&self) -> bool;
}
