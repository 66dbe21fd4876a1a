//! One analysis run: normalize → baseline → scan → simulate → aggregate.
//!
//! Two entry points:
//! - `run_analysis()`: raw provider records in. Used by the runner for one report.
//! - `analyze_series()`: an already-normalized series. Used by sweeps, which
//!   normalize once and evaluate many parameter sets.
//!
//! Both are pure: the same inputs always produce a bit-identical result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::normalize::{normalize, NormalizeReport};
use super::scanner::BreakoutScanner;
use super::simulator::{Exclusions, TradeSimulator};
use super::stats::{returns_of, SummaryStats};
use crate::data::RawBar;
use crate::domain::{BreakoutEvent, DatasetHash, RunId, Series, Trade};
use crate::error::AnalysisError;
use crate::fingerprint;
use crate::params::{AnalysisParams, AnalysisRequest};

/// Complete, immutable result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symbol: String,
    pub params: AnalysisParams,

    // ── Data ──
    pub analysis_start: NaiveDate,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub bar_count: usize,
    pub warmup_bars: usize,
    /// Normalization counters; `None` when the series was normalized elsewhere.
    pub data_quality: Option<NormalizeReport>,

    // ── Detection ──
    /// Bars that had a baseline and could have triggered.
    pub candidates: usize,
    pub events: Vec<BreakoutEvent>,

    // ── Simulation ──
    pub trades: Vec<Trade>,
    pub exclusions: Exclusions,

    // ── Statistics ──
    pub count: usize,
    /// `None` when no trade completed.
    pub summary: Option<SummaryStats>,
    /// Per-trade `return_pct`, in trade order.
    pub returns: Vec<f64>,

    // ── Identity ──
    pub dataset_hash: DatasetHash,
    pub run_id: RunId,
}

impl AnalysisResult {
    pub fn has_trades(&self) -> bool {
        self.count > 0
    }

    pub fn win_rate(&self) -> Option<f64> {
        self.summary.map(|s| s.win_rate)
    }

    pub fn mean_return(&self) -> Option<f64> {
        self.summary.map(|s| s.mean_return)
    }

    pub fn max_return(&self) -> Option<f64> {
        self.summary.map(|s| s.max_return)
    }

    pub fn min_return(&self) -> Option<f64> {
        self.summary.map(|s| s.min_return)
    }

    /// Events that matched but could not become trades.
    pub fn excluded_events(&self) -> usize {
        self.exclusions.excluded_events()
    }
}

/// Run the full pipeline on raw provider records.
///
/// Parameters are validated before any data is touched.
pub fn run_analysis(
    request: &AnalysisRequest,
    raw: Vec<RawBar>,
) -> Result<AnalysisResult, AnalysisError> {
    request.params.validate()?;
    request.range.validate()?;

    let normalized = normalize(
        &request.symbol,
        raw,
        &request.range,
        request.params.baseline_window,
    )?;
    let result = analyze_series(&normalized.series, &request.params)?;

    Ok(AnalysisResult {
        data_quality: Some(normalized.report),
        ..result
    })
}

/// Run baseline → scan → simulate → aggregate on a normalized series.
pub fn analyze_series(
    series: &Series,
    params: &AnalysisParams,
) -> Result<AnalysisResult, AnalysisError> {
    params.validate()?;

    let required = params.min_bars();
    if series.len() < required {
        return Err(AnalysisError::InsufficientData {
            available: series.len(),
            required,
        });
    }

    let scanner = BreakoutScanner::new(params)?;
    let simulator = TradeSimulator::new(params.holding_period)?;

    let scan = scanner.scan(series);
    let simulation = simulator.simulate(series, &scan.events);

    let returns = returns_of(&simulation.trades);
    let summary = SummaryStats::compute(&returns);
    let exclusions = Exclusions {
        zero_prior_close: scan.zero_prior_close,
        ..simulation.exclusions
    };

    let dataset_hash = fingerprint::dataset_hash(series);
    let run_id = RunId::derive(params, &dataset_hash);
    let bars = series.bars();

    debug!(
        symbol = series.symbol(),
        events = scan.events.len(),
        trades = simulation.trades.len(),
        excluded = exclusions.excluded_events(),
        run_id = run_id.short(),
        "analysis complete"
    );

    Ok(AnalysisResult {
        symbol: series.symbol().to_string(),
        params: *params,
        analysis_start: series.analysis_start(),
        first_date: bars[0].date,
        last_date: bars[bars.len() - 1].date,
        bar_count: series.len(),
        warmup_bars: series.warmup_len(),
        data_quality: None,
        candidates: scan.candidates,
        events: scan.events,
        count: simulation.trades.len(),
        trades: simulation.trades,
        exclusions,
        summary,
        returns,
        dataset_hash,
        run_id,
    })
}
