//! Close-over-close percentage change.
//!
//! `(close[i] - close[i-1]) / close[i-1] * 100`. Undefined on the first bar and
//! whenever the prior close is zero.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Copy, Default)]
pub struct PriceChange;

impl PriceChange {
    pub fn new() -> Self {
        Self
    }
}

impl Indicator for PriceChange {
    fn name(&self) -> &str {
        "price_change_pct"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<Option<f64>> {
        let mut result = vec![None; bars.len()];
        for (i, pair) in bars.windows(2).enumerate() {
            let prev = pair[0].close;
            if prev == 0.0 {
                continue;
            }
            result[i + 1] = Some((pair[1].close - prev) / prev * 100.0);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn percent_change_basic() {
        let bars = make_bars(&[100.0, 103.0, 97.85], &[1, 1, 1]);
        let result = PriceChange::new().compute(&bars);
        assert_eq!(result[0], None);
        assert_approx(result[1].unwrap(), 3.0, DEFAULT_EPSILON);
        assert_approx(result[2].unwrap(), -5.0, 1e-9);
    }

    #[test]
    fn zero_prior_close_is_undefined() {
        let bars = make_bars(&[0.0, 5.0, 10.0], &[1, 1, 1]);
        let result = PriceChange::new().compute(&bars);
        assert_eq!(result[1], None);
        assert_approx(result[2].unwrap(), 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_and_single_bar() {
        assert!(PriceChange::new().compute(&[]).is_empty());
        let bars = make_bars(&[10.0], &[1]);
        assert_eq!(PriceChange::new().compute(&bars), vec![None]);
    }
}
