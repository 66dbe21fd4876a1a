//! Rolling volume baseline.
//!
//! Arithmetic mean of volume over the `window` bars *before* each bar, so the
//! current day never dilutes its own comparison.
//! Lookback: window (first valid value at index window).

use super::Indicator;
use crate::domain::Bar;
use crate::error::AnalysisError;

#[derive(Debug, Clone)]
pub struct VolumeBaseline {
    window: usize,
    name: String,
}

impl VolumeBaseline {
    pub fn new(window: usize) -> Result<Self, AnalysisError> {
        if window == 0 {
            return Err(AnalysisError::invalid_parameter(
                "baseline_window",
                "must be a positive integer",
            ));
        }
        Ok(Self {
            window,
            name: format!("volume_baseline_{window}"),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for VolumeBaseline {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let n = bars.len();
        let mut result = vec![None; n];

        if n <= self.window {
            return result;
        }

        // Integer running sum keeps the mean exact and order-independent
        let mut sum: u128 = bars[..self.window]
            .iter()
            .map(|b| u128::from(b.volume))
            .sum();

        for i in self.window..n {
            result[i] = Some(sum as f64 / self.window as f64);
            sum += u128::from(bars[i].volume);
            sum -= u128::from(bars[i - self.window].volume);
        }

        result
    }
}
