//! End-to-end pipeline scenarios on hand-built series.

use breakout_core::data::RawBar;
use breakout_core::{run_analysis, AnalysisError, AnalysisParams, AnalysisRequest, DateRange};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive daily bars from 2024-01-01.
fn daily(closes: &[f64], volumes: &[u64]) -> Vec<RawBar> {
    let base = date(2024, 1, 1);
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| RawBar::new(base + chrono::Duration::days(i as i64), c, v))
        .collect()
}

fn params(holding_period: usize, price_threshold_pct: f64) -> AnalysisParams {
    AnalysisParams {
        volume_threshold_pct: 100.0,
        price_threshold_pct,
        holding_period,
        baseline_window: 20,
    }
}

fn request(params: AnalysisParams) -> AnalysisRequest {
    AnalysisRequest::new("X", DateRange::new(date(2024, 1, 1), date(2024, 12, 31)), params)
}

/// Flat 100 / 1M for 20 days, then a 3% jump on 2.5M, then flat at 103.
fn single_spike() -> Vec<RawBar> {
    let mut closes = vec![100.0; 20];
    closes.extend([103.0; 5]);
    let mut volumes = vec![1_000_000; 25];
    volumes[20] = 2_500_000;
    daily(&closes, &volumes)
}

#[test]
fn one_breakout_three_day_hold() {
    let result = run_analysis(&request(params(3, 2.0)), single_spike()).unwrap();

    assert_eq!(result.events.len(), 1);
    let event = &result.events[0];
    assert_eq!(event.trigger_date, date(2024, 1, 21));
    assert_eq!(event.baseline_volume, 1_000_000.0);
    assert_eq!(event.volume_ratio, 2.5);
    assert!((event.price_change_pct - 3.0).abs() < 1e-9);

    let trade = &result.trades[0];
    assert_eq!(trade.entry_price, 103.0);
    assert_eq!(trade.exit_date, date(2024, 1, 24));
    assert_eq!(trade.exit_price, 103.0);
    assert_eq!(trade.return_pct, 0.0);

    let stats = result.summary.unwrap();
    assert_eq!(stats.win_rate, 0.0);
    assert_eq!(stats.mean_return, 0.0);
    assert_eq!(stats.std_dev_return, 0.0);
}

#[test]
fn trigger_too_close_to_end_is_excluded() {
    let result = run_analysis(&request(params(5, 2.0)), single_spike()).unwrap();
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.count, 0);
    assert_eq!(result.exclusions.insufficient_forward_data, 1);
    assert!(result.summary.is_none());
}

#[test]
fn zero_close_trigger_is_excluded_from_trades() {
    // Close drops from 100 to 0 (-100%) on 3M volume. With a -150% price
    // threshold the bar qualifies, but a zero entry price has no return.
    let mut closes = vec![100.0; 20];
    closes.extend([0.0, 50.0, 50.0]);
    let mut volumes = vec![1_000_000; 23];
    volumes[20] = 3_000_000;

    let result = run_analysis(&request(params(1, -150.0)), daily(&closes, &volumes)).unwrap();

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].entry_price, 0.0);
    assert_eq!(result.count, 0);
    assert_eq!(result.exclusions.zero_entry_price, 1);
    // Bar 21 follows a zero close and is skipped, not divided by zero.
    assert_eq!(result.exclusions.zero_prior_close, 1);
}

#[test]
fn winning_and_losing_trades_summarized() {
    // Two spikes: the first rises 10% over the hold, the second falls 10%.
    let mut closes = vec![100.0; 20];
    closes.extend([105.0, 110.0, 115.5]);
    closes.extend([115.5; 17]);
    closes.extend([120.0, 110.0, 108.0]);
    let mut volumes = vec![1_000_000; closes.len()];
    volumes[20] = 5_000_000;
    volumes[40] = 5_000_000;

    let result = run_analysis(&request(params(2, 2.0)), daily(&closes, &volumes)).unwrap();

    assert_eq!(result.count, 2);
    assert!((result.returns[0] - 10.0).abs() < 1e-9);
    assert!((result.returns[1] - -10.0).abs() < 1e-9);
    let stats = result.summary.unwrap();
    assert_eq!(stats.win_rate, 0.5);
    assert!(stats.mean_return.abs() < 1e-9);
    assert!((stats.max_return - 10.0).abs() < 1e-9);
    assert!((stats.min_return + 10.0).abs() < 1e-9);
}

#[test]
fn no_conditions_met_is_not_an_error() {
    let result = run_analysis(
        &request(params(3, 2.0)),
        daily(&[100.0; 30], &[1_000_000; 30]),
    )
    .unwrap();
    assert!(result.events.is_empty());
    assert!(!result.has_trades());
    assert_eq!(result.candidates, 10);
}

#[test]
fn start_not_before_end_is_invalid_range() {
    let req = AnalysisRequest::new(
        "X",
        DateRange::new(date(2024, 6, 1), date(2024, 1, 1)),
        params(3, 2.0),
    );
    assert!(matches!(
        run_analysis(&req, single_spike()),
        Err(AnalysisError::InvalidRange { .. })
    ));
}

#[test]
fn nonpositive_holding_period_is_invalid_parameter() {
    assert!(matches!(
        run_analysis(&request(params(0, 2.0)), single_spike()),
        Err(AnalysisError::InvalidParameter {
            name: "holding_period",
            ..
        })
    ));
}

#[test]
fn twenty_bars_with_window_twenty_is_insufficient() {
    let bars = daily(&[100.0; 20], &[1_000_000; 20]);
    assert_eq!(
        run_analysis(&request(params(3, 2.0)), bars).unwrap_err(),
        AnalysisError::InsufficientData {
            available: 20,
            required: 21,
        }
    );
}

#[test]
fn provider_order_does_not_matter() {
    let mut shuffled = single_spike();
    shuffled.reverse();
    let a = run_analysis(&request(params(3, 2.0)), single_spike()).unwrap();
    let b = run_analysis(&request(params(3, 2.0)), shuffled).unwrap();
    assert_eq!(a.events, b.events);
    assert_eq!(a.trades, b.trades);
    assert_eq!(a.run_id, b.run_id);
}
