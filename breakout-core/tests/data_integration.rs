//! Providers feeding the pipeline: CSV files on disk and the synthetic walk.

use chrono::NaiveDate;
use std::io::Write;

use breakout_core::data::{CsvProvider, DataProvider, DataSource, SyntheticProvider};
use breakout_core::{run_analysis, AnalysisParams, AnalysisRequest, DateRange};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn params() -> AnalysisParams {
    AnalysisParams {
        volume_threshold_pct: 100.0,
        price_threshold_pct: 2.0,
        holding_period: 3,
        baseline_window: 5,
    }
}

/// Yahoo-style export: mixed-case headers, adjusted close column, a null row,
/// one duplicated date and one row outside the requested range.
fn write_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Adj Close,Volume").unwrap();
    writeln!(file, "2023-12-29,1,1,1,50,50,100").unwrap();
    let rows = [
        ("2024-01-02", 100.0, 1000),
        ("2024-01-03", 100.0, 1000),
        ("2024-01-04", 100.0, 1000),
        ("2024-01-05", 100.0, 1000),
        ("2024-01-08", 100.0, 1000),
        ("2024-01-09", 105.0, 5000),
        ("2024-01-10", 106.0, 1000),
        ("2024-01-11", 107.0, 1000),
        ("2024-01-12", 110.0, 1000),
    ];
    for (d, close, volume) in rows {
        writeln!(file, "{d},0,0,0,{close},{close},{volume}").unwrap();
    }
    writeln!(file, "2024-01-10,0,0,0,999,999,1").unwrap();
    writeln!(file, "2024-01-15,null,null,null,null,null,null").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn csv_file_through_pipeline() {
    let file = write_fixture();
    let provider = CsvProvider::new(file.path());
    assert!(provider.is_available());

    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
    let fetched = provider.fetch("TEST", range.start, range.end).unwrap();
    assert_eq!(fetched.source, DataSource::CsvImport);

    let request = AnalysisRequest::new("TEST", range, params());
    let result = run_analysis(&request, fetched.bars).unwrap();

    assert_eq!(result.bar_count, 9);
    assert_eq!(result.data_quality.map(|q| q.duplicates_dropped), Some(1));
    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].trigger_date, date(2024, 1, 9));
    assert_eq!(result.trades[0].exit_date, date(2024, 1, 12));
    assert!((result.returns[0] - (110.0 - 105.0) / 105.0 * 100.0).abs() < 1e-9);
}

#[test]
fn missing_csv_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvProvider::new(dir.path().join("absent.csv"));
    assert!(!provider.is_available());
    assert!(provider
        .fetch("TEST", date(2024, 1, 1), date(2024, 2, 1))
        .is_err());
}

#[test]
fn synthetic_year_produces_trades() {
    let provider = SyntheticProvider::with_salt(42);
    let range = DateRange::new(date(2023, 1, 1), date(2023, 12, 31));
    let fetched = provider.fetch("SYNTH", range.start, range.end).unwrap();
    assert!(fetched.source.is_synthetic());

    let request = AnalysisRequest::new("SYNTH", range, AnalysisParams::default());
    let a = run_analysis(&request, fetched.bars.clone()).unwrap();
    let b = run_analysis(&request, fetched.bars).unwrap();

    assert_eq!(a.bar_count, 260);
    assert_eq!(a, b);
    assert_eq!(a.count + a.excluded_events(), a.events.len());
}
