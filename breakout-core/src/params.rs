//! Explicit run parameters.
//!
//! A run is fully described by an [`AnalysisRequest`]: the ticker, the date range
//! and the [`AnalysisParams`]. Nothing else influences the result.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

pub const DEFAULT_BASELINE_WINDOW: usize = 20;
pub const DEFAULT_HOLDING_PERIOD: usize = 10;
/// Volume must exceed the baseline by 100%, i.e. more than twice the average.
pub const DEFAULT_VOLUME_THRESHOLD_PCT: f64 = 100.0;
pub const DEFAULT_PRICE_THRESHOLD_PCT: f64 = 2.0;

/// Detection and simulation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Required volume excess over the baseline, in percent.
    pub volume_threshold_pct: f64,
    /// Required close-over-close change, in percent. May be negative.
    pub price_threshold_pct: f64,
    /// Trading days between entry and exit.
    pub holding_period: usize,
    /// Number of prior bars averaged into the volume baseline.
    pub baseline_window: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            volume_threshold_pct: DEFAULT_VOLUME_THRESHOLD_PCT,
            price_threshold_pct: DEFAULT_PRICE_THRESHOLD_PCT,
            holding_period: DEFAULT_HOLDING_PERIOD,
            baseline_window: DEFAULT_BASELINE_WINDOW,
        }
    }
}

impl AnalysisParams {
    /// Fail fast on parameters no run can use.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.holding_period == 0 {
            return Err(AnalysisError::invalid_parameter(
                "holding_period",
                "must be a positive integer",
            ));
        }
        if self.baseline_window == 0 {
            return Err(AnalysisError::invalid_parameter(
                "baseline_window",
                "must be a positive integer",
            ));
        }
        if !self.volume_threshold_pct.is_finite() || self.volume_threshold_pct <= 0.0 {
            return Err(AnalysisError::invalid_parameter(
                "volume_threshold_pct",
                format!("must be a finite value > 0, got {}", self.volume_threshold_pct),
            ));
        }
        if !self.price_threshold_pct.is_finite() {
            return Err(AnalysisError::invalid_parameter(
                "price_threshold_pct",
                format!("must be finite, got {}", self.price_threshold_pct),
            ));
        }
        Ok(())
    }

    /// Factor applied to the baseline: `1 + volume_threshold_pct / 100`.
    pub fn volume_multiplier(&self) -> f64 {
        1.0 + self.volume_threshold_pct / 100.0
    }

    /// Smallest series the baseline can be evaluated on.
    pub fn min_bars(&self) -> usize {
        self.baseline_window.saturating_add(1)
    }
}

/// Calendar range of a run, plus optional warmup padding before `start`.
///
/// Warmup bars feed the volume baseline but are never trigger days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub warmup_days: u32,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            warmup_days: 0,
        }
    }

    pub fn with_warmup(mut self, warmup_days: u32) -> Self {
        self.warmup_days = warmup_days;
        self
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.start >= self.end {
            return Err(AnalysisError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// First calendar day whose bar is retained.
    pub fn warmup_start(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(u64::from(self.warmup_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Whether a bar dated `date` belongs to the series (warmup included).
    pub fn retains(&self, date: NaiveDate) -> bool {
        date >= self.warmup_start() && date <= self.end
    }
}

/// Everything one pipeline run needs besides the bars themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub range: DateRange,
    pub params: AnalysisParams,
}

impl AnalysisRequest {
    pub fn new(symbol: impl Into<String>, range: DateRange, params: AnalysisParams) -> Self {
        Self {
            symbol: symbol.into(),
            range,
            params,
        }
    }
}
