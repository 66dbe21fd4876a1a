//! Per-bar derived series.
//!
//! Indicators are pure functions: bar history in, one value per bar out. A value
//! of `None` means the indicator is undefined for that bar (warmup, or a
//! degenerate input such as a zero prior close). They are computed once per run
//! before the scanner walks the bars.
//!
//! # Look-ahead contamination guard
//! No value at bar t may depend on data from bar t+1 or later. Every indicator
//! must pass the truncated-vs-full series test.

pub mod price_change;
pub mod volume_baseline;

pub use price_change::PriceChange;
pub use volume_baseline::VolumeBaseline;

use crate::domain::Bar;

pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "volume_baseline_20").
    fn name(&self) -> &str;

    /// Number of leading bars that can never produce a value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec` of the same length as `bars`; the first `lookback()`
    /// entries are `None`.
    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>>;
}

/// Create synthetic bars from closes and volumes for testing.
#[cfg(test)]
pub fn make_bars(closes: &[f64], volumes: &[u64]) -> Vec<Bar> {
    assert_eq!(closes.len(), volumes.len());
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            Bar::new(base_date + chrono::Duration::days(i as i64), close, volume)
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
