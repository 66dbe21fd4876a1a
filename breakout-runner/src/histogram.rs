//! Equal-width histogram of trade returns.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BINS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// The last bin is closed on the right. Non-finite values are ignored.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let (Some(min), Some(max)) = (
            finite.iter().copied().reduce(f64::min),
            finite.iter().copied().reduce(f64::max),
        ) else {
            return Self::default();
        };

        if min == max {
            return Self {
                bins: vec![Bin {
                    start: min,
                    end: max,
                    count: finite.len(),
                }],
            };
        }

        let n = bins.max(1);
        let width = (max - min) / n as f64;
        let mut out: Vec<Bin> = (0..n)
            .map(|i| Bin {
                start: min + width * i as f64,
                end: if i + 1 == n { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for v in finite {
            let idx = (((v - min) / width).floor() as usize).min(n - 1);
            out[idx].count += 1;
        }

        Self { bins: out }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
