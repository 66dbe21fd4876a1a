//! Parameter sweeps over a single normalized series.
//!
//! The series is loaded and normalized once; every grid point re-runs only the
//! scan, simulation and statistics, in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use breakout_core::domain::Series;
use breakout_core::{analyze_series, AnalysisParams};

/// Parameter grid specification.
///
/// An empty axis falls back to the base parameter's value. The baseline window
/// is never swept: it is fixed by the loaded series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub holding_periods: Vec<usize>,
    pub volume_thresholds: Vec<f64>,
    pub price_thresholds: Vec<f64>,
}

impl ParamGrid {
    /// Returns the total number of parameter sets in this grid.
    pub fn size(&self) -> usize {
        self.holding_periods.len().max(1)
            * self.volume_thresholds.len().max(1)
            * self.price_thresholds.len().max(1)
    }

    /// Cartesian product in grid order: holding period outermost, price
    /// threshold innermost.
    pub fn generate(&self, base: &AnalysisParams) -> Vec<AnalysisParams> {
        let holding = axis(&self.holding_periods, base.holding_period);
        let volume = axis(&self.volume_thresholds, base.volume_threshold_pct);
        let price = axis(&self.price_thresholds, base.price_threshold_pct);

        let mut out = Vec::with_capacity(self.size());
        for &holding_period in &holding {
            for &volume_threshold_pct in &volume {
                for &price_threshold_pct in &price {
                    out.push(AnalysisParams {
                        holding_period,
                        volume_threshold_pct,
                        price_threshold_pct,
                        ..*base
                    });
                }
            }
        }
        out
    }
}

fn axis<T: Copy>(values: &[T], fallback: T) -> Vec<T> {
    if values.is_empty() {
        vec![fallback]
    } else {
        values.to_vec()
    }
}

/// One grid point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepRow {
    pub params: AnalysisParams,
    pub events: usize,
    pub trade_count: usize,
    pub win_rate: Option<f64>,
    pub mean_return: Option<f64>,
    pub excluded: usize,
    /// Set when this parameter set could not be evaluated.
    pub error: Option<String>,
}

/// Evaluate every grid point against `series`. Rows keep grid order.
pub fn run_sweep(series: &Series, base: &AnalysisParams, grid: &ParamGrid) -> Vec<SweepRow> {
    let param_sets = grid.generate(base);
    info!(
        symbol = series.symbol(),
        combinations = param_sets.len(),
        "starting parameter sweep"
    );

    param_sets
        .par_iter()
        .map(|params| match analyze_series(series, params) {
            Ok(result) => SweepRow {
                params: *params,
                events: result.events.len(),
                trade_count: result.count,
                win_rate: result.win_rate(),
                mean_return: result.mean_return(),
                excluded: result.excluded_events(),
                error: None,
            },
            Err(e) => SweepRow {
                params: *params,
                events: 0,
                trade_count: 0,
                win_rate: None,
                mean_return: None,
                excluded: 0,
                error: Some(e.to_string()),
            },
        })
        .collect()
}

/// Row with the highest mean return among rows that produced trades.
pub fn best_by_mean_return(rows: &[SweepRow]) -> Option<&SweepRow> {
    rows.iter()
        .filter_map(|r| r.mean_return.map(|m| (r, m)))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(r, _)| r)
}
