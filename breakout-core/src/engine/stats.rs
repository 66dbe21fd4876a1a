//! Statistics aggregator — pure functions over per-trade returns.
//!
//! Every metric takes the ordered `return_pct` slice. An empty slice is the
//! "no trades" state and yields `None` from [`SummaryStats::compute`]; no metric
//! ever produces NaN.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;

/// Summary of a non-empty trade set. Returns are in percent; `win_rate` is a
/// fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub win_rate: f64,
    pub mean_return: f64,
    pub max_return: f64,
    pub min_return: f64,
    pub std_dev_return: f64,
}

impl SummaryStats {
    pub fn compute(returns: &[f64]) -> Option<Self> {
        if returns.is_empty() {
            return None;
        }
        Some(Self {
            win_rate: win_rate(returns)?,
            mean_return: mean(returns)?,
            max_return: max(returns)?,
            min_return: min(returns)?,
            std_dev_return: std_dev(returns),
        })
    }
}

/// Ordered `return_pct` values of the trades.
pub fn returns_of(trades: &[Trade]) -> Vec<f64> {
    trades.iter().map(|t| t.return_pct).collect()
}

/// Fraction of strictly positive returns.
pub fn win_rate(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let winners = returns.iter().filter(|&&r| r > 0.0).count();
    Some(winners as f64 / returns.len() as f64)
}

pub fn mean(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    Some(returns.iter().sum::<f64>() / returns.len() as f64)
}

pub fn max(returns: &[f64]) -> Option<f64> {
    returns.iter().copied().reduce(f64::max)
}

pub fn min(returns: &[f64]) -> Option<f64> {
    returns.iter().copied().reduce(f64::min)
}

/// Sample standard deviation (`n - 1` denominator). `0.0` below two samples.
pub fn std_dev(returns: &[f64]) -> f64 {
    let n = returns.len();
    if n < 2 {
        return 0.0;
    }
    let mean = returns.iter().sum::<f64>() / n as f64;
    let var = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_no_trades() {
        assert_eq!(SummaryStats::compute(&[]), None);
        assert_eq!(win_rate(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(std_dev(&[]), 0.0);
    }

    #[test]
    fn summary_of_mixed_returns() {
        let stats = SummaryStats::compute(&[10.0, -5.0, 0.0, 3.0]).unwrap();
        assert_eq!(stats.win_rate, 0.5);
        assert_eq!(stats.mean_return, 2.0);
        assert_eq!(stats.max_return, 10.0);
        assert_eq!(stats.min_return, -5.0);
        // deviations 8, -7, -2, 1 → 118 / 3
        assert!((stats.std_dev_return - (118.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn zero_return_is_not_a_win() {
        assert_eq!(win_rate(&[0.0, 0.0]), Some(0.0));
    }

    #[test]
    fn single_trade_has_zero_std_dev() {
        let stats = SummaryStats::compute(&[4.2]).unwrap();
        assert_eq!(stats.std_dev_return, 0.0);
        assert_eq!(stats.win_rate, 1.0);
        assert_eq!(stats.max_return, stats.min_return);
    }
}
