//! Look-ahead contamination tests.
//!
//! No baseline, price change, or event at bar t may depend on bar t+1 or later.
//!
//! Method: compute on a truncated series (first 150 bars) and the full series
//! (300 bars). Everything up to the truncation point must be identical.

use breakout_core::data::SyntheticProvider;
use breakout_core::engine::{normalize, BreakoutScanner};
use breakout_core::indicators::{Indicator, PriceChange, VolumeBaseline};
use breakout_core::{AnalysisParams, DateRange};
use chrono::NaiveDate;

const CUT: usize = 150;

fn full_and_truncated() -> (breakout_core::domain::Series, breakout_core::domain::Series) {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
    let end = NaiveDate::from_ymd_opt(2022, 6, 30).unwrap();
    let raw = SyntheticProvider::with_salt(13).generate("LOOK", start, end);
    assert!(raw.len() >= 300);

    let range = DateRange::new(start, end);
    let full = normalize("LOOK", raw[..300].to_vec(), &range, 20).unwrap().series;
    let truncated = normalize("LOOK", raw[..CUT].to_vec(), &range, 20).unwrap().series;
    (full, truncated)
}

#[test]
fn volume_baseline_no_lookahead() {
    let (full, truncated) = full_and_truncated();
    for window in [1, 5, 20, 60] {
        let ind = VolumeBaseline::new(window).unwrap();
        let a = ind.compute(full.bars());
        let b = ind.compute(truncated.bars());
        assert_eq!(&a[..CUT], &b[..], "window {window} leaks future data");
    }
}

#[test]
fn price_change_no_lookahead() {
    let (full, truncated) = full_and_truncated();
    let a = PriceChange::new().compute(full.bars());
    let b = PriceChange::new().compute(truncated.bars());
    assert_eq!(&a[..CUT], &b[..]);
}

#[test]
fn events_no_lookahead() {
    let (full, truncated) = full_and_truncated();
    let params = AnalysisParams {
        volume_threshold_pct: 50.0,
        price_threshold_pct: 1.0,
        ..Default::default()
    };
    let scanner = BreakoutScanner::new(&params).unwrap();

    let a: Vec<_> = scanner
        .scan(&full)
        .events
        .into_iter()
        .filter(|e| e.bar_index < CUT)
        .collect();
    let b = scanner.scan(&truncated).events;
    assert_eq!(a, b);
}
