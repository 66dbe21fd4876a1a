//! Series normalizer: raw provider records in, a validated [`Series`] out.
//!
//! - records with a non-finite or negative close are dropped
//! - records outside `[warmup_start, end]` are dropped
//! - records are sorted by date (stable), and the first record for a date wins
//! - fewer than `baseline_window + 1` surviving bars is an error

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::RawBar;
use crate::domain::{Bar, Series};
use crate::error::AnalysisError;
use crate::params::DateRange;

/// Data-quality counters from one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeReport {
    pub input_records: usize,
    pub invalid_dropped: usize,
    pub out_of_range_dropped: usize,
    pub duplicates_dropped: usize,
    pub warmup_bars: usize,
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub series: Series,
    pub report: NormalizeReport,
}

pub fn normalize(
    symbol: &str,
    raw: Vec<RawBar>,
    range: &DateRange,
    baseline_window: usize,
) -> Result<Normalized, AnalysisError> {
    range.validate()?;
    if baseline_window == 0 {
        return Err(AnalysisError::invalid_parameter(
            "baseline_window",
            "must be a positive integer",
        ));
    }

    let mut report = NormalizeReport {
        input_records: raw.len(),
        ..Default::default()
    };

    let mut bars: Vec<Bar> = Vec::with_capacity(raw.len());
    for record in raw {
        let bar = Bar::new(record.date, record.close, record.volume);
        if !bar.has_usable_close() {
            report.invalid_dropped += 1;
        } else if !range.retains(bar.date) {
            report.out_of_range_dropped += 1;
        } else {
            bars.push(bar);
        }
    }

    // Stable sort keeps provider order among equal dates, so dedup keeps the first
    bars.sort_by_key(|b| b.date);
    let before_dedup = bars.len();
    bars.dedup_by_key(|b| b.date);
    report.duplicates_dropped = before_dedup - bars.len();
    report.warmup_bars = bars.partition_point(|b| b.date < range.start);

    let required = baseline_window.saturating_add(1);
    if bars.len() < required {
        return Err(AnalysisError::InsufficientData {
            available: bars.len(),
            required,
        });
    }

    debug!(
        symbol,
        bars = bars.len(),
        warmup = report.warmup_bars,
        invalid = report.invalid_dropped,
        duplicates = report.duplicates_dropped,
        out_of_range = report.out_of_range_dropped,
        "normalized series"
    );

    Ok(Normalized {
        series: Series::new(symbol.to_string(), bars, range.start),
        report,
    })
}
