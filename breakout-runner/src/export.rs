//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! - **JSON**: full round-trip serialization of an `AnalysisReport` with schema versioning
//! - **CSV**: per-trade table and return distribution for spreadsheets
//! - **Markdown**: human-readable run summary with exclusion disclosure
//!
//! Prices, returns and ratios in CSV output are rounded to two decimals.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use breakout_core::domain::Trade;

use crate::config::is_ticker_char;
use crate::histogram::Histogram;
use crate::runner::{AnalysisReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport`, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns: trigger_date, entry_price, exit_date, exit_price, return_pct,
/// volume_ratio, price_change_pct
pub fn export_trades_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "trigger_date",
        "entry_price",
        "exit_date",
        "exit_price",
        "return_pct",
        "volume_ratio",
        "price_change_pct",
    ])?;

    for t in trades {
        wtr.write_record([
            &t.trigger_date.to_string(),
            &format!("{:.2}", t.entry_price),
            &t.exit_date.to_string(),
            &format!("{:.2}", t.exit_price),
            &format!("{:.2}", t.return_pct),
            &format!("{:.2}", t.volume_ratio),
            &format!("{:.2}", t.price_change_pct),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Columns: bin_start, bin_end, count
pub fn export_distribution_csv(histogram: &Histogram) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["bin_start", "bin_end", "count"])?;
    for bin in &histogram.bins {
        wtr.write_record([
            &format!("{:.2}", bin.start),
            &format!("{:.2}", bin.end),
            &bin.count.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one run.
///
/// Creates `{symbol}_{timestamp}/` under `output_dir` containing:
/// - `{symbol}_breakout_analysis.csv` — per-trade table
/// - `distribution.csv` — return histogram
/// - `report.json` — the full `AnalysisReport`
/// - `summary.md` — Markdown summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    let stem = file_stem(&report.symbol);
    let dirname = format!("{}_{}", stem, chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let trades_path = run_dir.join(format!("{stem}_breakout_analysis.csv"));
    std::fs::write(&trades_path, export_trades_csv(&report.result.trades)?)
        .with_context(|| format!("failed to write {}", trades_path.display()))?;

    std::fs::write(
        run_dir.join("distribution.csv"),
        export_distribution_csv(&report.histogram)?,
    )?;
    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    std::fs::write(run_dir.join("summary.md"), render_markdown(report))?;

    Ok(run_dir)
}

/// Symbol as a single path component; anything outside the ticker alphabet becomes `_`.
fn file_stem(symbol: &str) -> String {
    let stem: String = symbol
        .chars()
        .map(|c| if is_ticker_char(c) { c } else { '_' })
        .collect();
    match stem.trim_matches('.') {
        "" => "_".to_string(),
        _ => stem,
    }
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let path = dir.join("report.json");
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn render_markdown(report: &AnalysisReport) -> String {
    let r = &report.result;
    let p = &report.params;
    let mut md = String::with_capacity(2048);

    md.push_str(&format!("# Breakout Analysis: {}\n\n", report.symbol));

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Period | {} to {} |\n",
        report.start_date, report.end_date
    ));
    md.push_str(&format!(
        "| Bars | {} ({} warmup) |\n",
        r.bar_count, r.warmup_bars
    ));
    md.push_str(&format!("| Source | {:?} |\n", report.source));
    md.push_str(&format!("| Dataset Hash | {} |\n", report.dataset_hash));
    md.push_str(&format!("| Run ID | {} |\n", r.run_id.short()));
    if report.is_synthetic {
        md.push_str("| Data | **SYNTHETIC** |\n");
    }
    md.push('\n');

    md.push_str("## Parameters\n\n");
    md.push_str("| Parameter | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Volume Threshold | {:.1}% above {}-day average |\n",
        p.volume_threshold_pct, p.baseline_window
    ));
    md.push_str(&format!(
        "| Price Threshold | {:.2}% daily change |\n",
        p.price_threshold_pct
    ));
    md.push_str(&format!(
        "| Holding Period | {} trading days |\n",
        p.holding_period
    ));
    md.push('\n');

    md.push_str("## Summary\n\n");
    match &r.summary {
        None => md.push_str("No breakout conditions found.\n\n"),
        Some(s) => {
            md.push_str("| Metric | Value |\n");
            md.push_str("| --- | --- |\n");
            md.push_str(&format!("| Trades | {} |\n", r.count));
            md.push_str(&format!("| Win Rate | {:.1}% |\n", s.win_rate * 100.0));
            md.push_str(&format!("| Average Return | {:.2}% |\n", s.mean_return));
            md.push_str(&format!("| Max Return | {:.2}% |\n", s.max_return));
            md.push_str(&format!("| Min Return | {:.2}% |\n", s.min_return));
            md.push_str(&format!("| Std Dev | {:.2}% |\n", s.std_dev_return));
            md.push('\n');
        }
    }

    let ex = &r.exclusions;
    if ex.total() > 0 {
        md.push_str("## Excluded\n\n");
        if ex.insufficient_forward_data > 0 {
            md.push_str(&format!(
                "- {} event(s) too close to the end of the data for a {}-day hold\n",
                ex.insufficient_forward_data, p.holding_period
            ));
        }
        if ex.zero_entry_price > 0 {
            md.push_str(&format!(
                "- {} event(s) with a zero entry price\n",
                ex.zero_entry_price
            ));
        }
        if ex.zero_prior_close > 0 {
            md.push_str(&format!(
                "- {} bar(s) skipped after a zero close\n",
                ex.zero_prior_close
            ));
        }
        md.push('\n');
    }

    if let Some(q) = r.data_quality.filter(|q| q.invalid_dropped + q.duplicates_dropped > 0) {
        md.push_str("## Data Quality\n\n");
        md.push_str(&format!(
            "- {} record(s) with an unusable close dropped\n",
            q.invalid_dropped
        ));
        md.push_str(&format!(
            "- {} duplicate date(s) dropped\n\n",
            q.duplicates_dropped
        ));
    }

    if !r.trades.is_empty() {
        md.push_str("## Trades\n\n");
        md.push_str("| Trigger | Entry | Exit Date | Exit | Return | Vol Ratio | Change |\n");
        md.push_str("| --- | ---: | --- | ---: | ---: | ---: | ---: |\n");
        for t in &r.trades {
            md.push_str(&format!(
                "| {} | {:.2} | {} | {:.2} | {:.2}% | {:.2}x | {:.2}% |\n",
                t.trigger_date,
                t.entry_price,
                t.exit_date,
                t.exit_price,
                t.return_pct,
                t.volume_ratio,
                t.price_change_pct
            ));
        }
        md.push('\n');
    }

    if !report.histogram.is_empty() {
        md.push_str("## Return Distribution\n\n");
        md.push_str("| From | To | Count |\n");
        md.push_str("| ---: | ---: | ---: |\n");
        for bin in &report.histogram.bins {
            md.push_str(&format!(
                "| {:.2}% | {:.2}% | {} |\n",
                bin.start, bin.end, bin.count
            ));
        }
        md.push('\n');
    }

    md
}
