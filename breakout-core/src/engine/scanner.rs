//! Breakout scanner.
//!
//! A bar is a breakout iff BOTH predicates hold:
//! - volume: `volume > baseline * (1 + volume_threshold_pct / 100)`
//! - price:  `close-over-close % change > price_threshold_pct`
//!
//! Bars without a baseline (index < window), warmup bars, and bars whose prior
//! close is zero are never events.

use tracing::debug;

use crate::domain::{BreakoutEvent, Series};
use crate::error::AnalysisError;
use crate::indicators::{Indicator, PriceChange, VolumeBaseline};
use crate::params::AnalysisParams;

/// Events found in one series plus the bars skipped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutcome {
    pub events: Vec<BreakoutEvent>,
    /// Bars with a baseline on or after the analysis start.
    pub candidates: usize,
    /// Candidates skipped because the prior close was zero.
    pub zero_prior_close: usize,
}

#[derive(Debug, Clone)]
pub struct BreakoutScanner {
    volume_multiplier: f64,
    price_threshold_pct: f64,
    baseline: VolumeBaseline,
    price_change: PriceChange,
}

impl BreakoutScanner {
    pub fn new(params: &AnalysisParams) -> Result<Self, AnalysisError> {
        params.validate()?;
        Ok(Self {
            volume_multiplier: params.volume_multiplier(),
            price_threshold_pct: params.price_threshold_pct,
            baseline: VolumeBaseline::new(params.baseline_window)?,
            price_change: PriceChange::new(),
        })
    }

    pub fn volume_condition(&self, volume: u64, baseline: f64) -> bool {
        volume as f64 > baseline * self.volume_multiplier
    }

    pub fn price_condition(&self, price_change_pct: f64) -> bool {
        price_change_pct > self.price_threshold_pct
    }

    pub fn scan(&self, series: &Series) -> ScanOutcome {
        let bars = series.bars();
        let baselines = self.baseline.compute(bars);
        let changes = self.price_change.compute(bars);
        let first_eligible = self.baseline.lookback().max(series.warmup_len());

        let mut outcome = ScanOutcome::default();

        for (i, bar) in bars.iter().enumerate().skip(first_eligible) {
            let Some(baseline) = baselines[i] else {
                continue;
            };
            outcome.candidates += 1;

            let Some(change) = changes[i] else {
                outcome.zero_prior_close += 1;
                continue;
            };

            if self.volume_condition(bar.volume, baseline) && self.price_condition(change) {
                outcome.events.push(BreakoutEvent {
                    bar_index: i,
                    trigger_date: bar.date,
                    entry_price: bar.close,
                    volume: bar.volume,
                    baseline_volume: baseline,
                    volume_ratio: bar.volume as f64 / baseline,
                    price_change_pct: change,
                });
            }
        }

        debug!(
            symbol = series.symbol(),
            indicator = self.baseline.name(),
            candidates = outcome.candidates,
            events = outcome.events.len(),
            zero_prior_close = outcome.zero_prior_close,
            "scan complete"
        );

        outcome
    }
}
