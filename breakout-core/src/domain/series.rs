//! Series — the ordered bars of one ticker that a run analyzes.

use chrono::NaiveDate;
use serde::Serialize;

use super::Bar;

/// Bars sorted by strictly increasing date.
///
/// Only the normalizer builds a `Series`, so the ordering invariant holds for
/// every instance. Bars dated before `analysis_start` are warmup bars: they feed
/// the volume baseline but are never trigger days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    symbol: String,
    bars: Vec<Bar>,
    analysis_start: NaiveDate,
}

impl Series {
    pub(crate) fn new(symbol: String, bars: Vec<Bar>, analysis_start: NaiveDate) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].date < w[1].date),
            "series dates must be strictly increasing"
        );
        Self {
            symbol,
            bars,
            analysis_start,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// First date on which a breakout may trigger.
    pub fn analysis_start(&self) -> NaiveDate {
        self.analysis_start
    }

    /// Number of leading bars dated before `analysis_start`.
    pub fn warmup_len(&self) -> usize {
        self.bars.partition_point(|b| b.date < self.analysis_start)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}
