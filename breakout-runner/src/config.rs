//! Serializable analysis configuration.
//!
//! A TOML file with two tables:
//!
//! ```toml
//! [analysis]
//! ticker = "AAPL"
//! start_date = "2024-01-02"
//! end_date = "2024-12-31"
//! volume_threshold_pct = 100.0
//! price_threshold_pct = 2.0
//! holding_period = 10
//! baseline_window = 20
//!
//! [data]
//! source = "yahoo"          # yahoo | csv | synthetic
//! csv_path = "data/AAPL.csv"
//! warmup_days = 35
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use breakout_core::params::{
    DEFAULT_BASELINE_WINDOW, DEFAULT_HOLDING_PERIOD, DEFAULT_PRICE_THRESHOLD_PCT,
    DEFAULT_VOLUME_THRESHOLD_PCT,
};
use breakout_core::{AnalysisParams, AnalysisRequest, DateRange};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "csv" => Ok(Self::Csv),
            "synthetic" => Ok(Self::Synthetic),
            other => Err(ConfigError::Invalid(format!(
                "unknown data source '{other}' (expected yahoo, csv or synthetic)"
            ))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yahoo => "yahoo",
            Self::Csv => "csv",
            Self::Synthetic => "synthetic",
        })
    }
}

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_volume_threshold_pct")]
    pub volume_threshold_pct: f64,
    #[serde(default = "default_price_threshold_pct")]
    pub price_threshold_pct: f64,
    #[serde(default = "default_holding_period")]
    pub holding_period: usize,
    #[serde(default = "default_baseline_window")]
    pub baseline_window: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSection {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
    /// Calendar days fetched before `start_date` to seed the baseline.
    #[serde(default)]
    pub warmup_days: Option<u32>,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            csv_path: None,
            warmup_days: None,
        }
    }
}

fn default_volume_threshold_pct() -> f64 {
    DEFAULT_VOLUME_THRESHOLD_PCT
}

fn default_price_threshold_pct() -> f64 {
    DEFAULT_PRICE_THRESHOLD_PCT
}

fn default_holding_period() -> usize {
    DEFAULT_HOLDING_PERIOD
}

fn default_baseline_window() -> usize {
    DEFAULT_BASELINE_WINDOW
}

fn default_source() -> String {
    SourceKind::Yahoo.to_string()
}

/// Calendar-day padding that yields at least `baseline_window` trading days
/// before the start date, allowing for weekends and holidays.
pub fn default_warmup_days(baseline_window: usize) -> u32 {
    let days = baseline_window.saturating_mul(3) / 2 + 5;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Characters that appear in exchange symbols (`BRK-B`, `^GSPC`, `EURUSD=X`).
pub fn is_ticker_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_')
}

impl AnalysisConfig {
    /// Config with default thresholds and the Yahoo source.
    pub fn new(ticker: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            analysis: AnalysisSection {
                ticker: ticker.into(),
                start_date,
                end_date,
                volume_threshold_pct: DEFAULT_VOLUME_THRESHOLD_PCT,
                price_threshold_pct: DEFAULT_PRICE_THRESHOLD_PCT,
                holding_period: DEFAULT_HOLDING_PERIOD,
                baseline_window: DEFAULT_BASELINE_WINDOW,
            },
            data: DataSection::default(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Ticker as the providers expect it (trimmed, upper case).
    pub fn ticker(&self) -> String {
        self.analysis.ticker.trim().to_ascii_uppercase()
    }

    pub fn source(&self) -> Result<SourceKind, ConfigError> {
        self.data.source.parse()
    }

    /// Structural checks. Numeric parameters are validated by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ticker = self.ticker();
        if ticker.is_empty() {
            return Err(ConfigError::Invalid("ticker must not be empty".into()));
        }
        if !ticker.chars().all(is_ticker_char) {
            return Err(ConfigError::Invalid(format!(
                "ticker {ticker:?} may only contain letters, digits and . - ^ = _"
            )));
        }
        if self.source()? == SourceKind::Csv && self.data.csv_path.is_none() {
            return Err(ConfigError::Invalid(
                "data.csv_path is required when data.source = \"csv\"".into(),
            ));
        }
        Ok(())
    }

    pub fn params(&self) -> AnalysisParams {
        AnalysisParams {
            volume_threshold_pct: self.analysis.volume_threshold_pct,
            price_threshold_pct: self.analysis.price_threshold_pct,
            holding_period: self.analysis.holding_period,
            baseline_window: self.analysis.baseline_window,
        }
    }

    pub fn warmup_days(&self) -> u32 {
        self.data
            .warmup_days
            .unwrap_or_else(|| default_warmup_days(self.analysis.baseline_window))
    }

    pub fn to_request(&self) -> AnalysisRequest {
        let range = DateRange::new(self.analysis.start_date, self.analysis.end_date)
            .with_warmup(self.warmup_days());
        AnalysisRequest::new(self.ticker(), range, self.params())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
