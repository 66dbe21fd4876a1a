//! Breakout CLI — run, sweep, and download commands.
//!
//! Commands:
//! - `run` — analyze one ticker from a TOML config file or command-line flags
//! - `sweep` — evaluate a grid of holding periods and thresholds on one series
//! - `download` — fetch daily bars from Yahoo Finance into a `date,close,volume` CSV

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use breakout_core::data::{write_bars_csv, DataProvider, YahooProvider};
use breakout_runner::export::{export_json, save_artifacts};
use breakout_runner::{
    best_by_mean_return, is_ticker_char, load_series, provider_for, run_report, AnalysisConfig,
    AnalysisReport, ParamGrid, SweepRow,
};

#[derive(Parser)]
#[command(
    name = "breakout",
    about = "Volume/price breakout analyzer — how do stocks perform after high-volume up days?"
)]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one ticker and print statistics and the trade table.
    Run {
        #[command(flatten)]
        data: DataArgs,

        /// Save CSV, JSON, and Markdown artifacts under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the full report as JSON instead of tables.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Evaluate a parameter grid on one loaded series.
    Sweep {
        #[command(flatten)]
        data: DataArgs,

        /// Comma-separated holding periods (e.g. 1,5,10,20).
        #[arg(long)]
        holding_periods: Option<String>,

        /// Comma-separated volume thresholds in percent (e.g. 50,100,200).
        #[arg(long, allow_hyphen_values = true)]
        volume_thresholds: Option<String>,

        /// Comma-separated price thresholds in percent (e.g. 1,2,3).
        #[arg(long, allow_hyphen_values = true)]
        price_thresholds: Option<String>,

        /// Print rows as JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Download daily bars from Yahoo Finance into a CSV file.
    Download {
        /// Ticker symbol (e.g., AAPL).
        ticker: String,

        /// Start date (YYYY-MM-DD). Defaults to 10 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Output file. Defaults to ./{TICKER}.csv.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Where the analysis inputs come from. Flags override values from `--config`.
#[derive(Args)]
struct DataArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticker symbol (required without --config).
    #[arg(long)]
    ticker: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to one year ago.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Volume must exceed the baseline by this percent.
    #[arg(long)]
    volume_threshold: Option<f64>,

    /// Close-over-close change must exceed this percent.
    #[arg(long, allow_hyphen_values = true)]
    price_threshold: Option<f64>,

    /// Trading days to hold after the trigger.
    #[arg(long)]
    holding_period: Option<usize>,

    /// Trailing days in the volume baseline.
    #[arg(long)]
    baseline_window: Option<usize>,

    /// Calendar days fetched before the start date to seed the baseline.
    #[arg(long)]
    warmup_days: Option<u32>,

    /// Read bars from a CSV file instead of Yahoo Finance.
    #[arg(long, conflicts_with = "synthetic")]
    csv: Option<PathBuf>,

    /// Use deterministic synthetic bars (results are tagged).
    #[arg(long, default_value_t = false)]
    synthetic: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            data,
            output_dir,
            json,
        } => run_cmd(&data, output_dir, json),
        Commands::Sweep {
            data,
            holding_periods,
            volume_thresholds,
            price_thresholds,
            json,
        } => {
            let grid = ParamGrid {
                holding_periods: parse_list(holding_periods.as_deref(), "--holding-periods")?,
                volume_thresholds: parse_list(volume_thresholds.as_deref(), "--volume-thresholds")?,
                price_thresholds: parse_list(price_thresholds.as_deref(), "--price-thresholds")?,
            };
            sweep_cmd(&data, &grid, json)
        }
        Commands::Download {
            ticker,
            start,
            end,
            output,
        } => download_cmd(&ticker, start, end, output),
    }
}

/// Logs go to stderr so stdout carries only the report.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_date(s: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("{flag} must be YYYY-MM-DD, got '{s}'"))
}

fn parse_list<T>(s: Option<&str>, flag: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(s) = s else {
        return Ok(Vec::new());
    };
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<T>()
                .with_context(|| format!("{flag}: cannot parse '{v}'"))
        })
        .collect()
}

fn build_config(args: &DataArgs) -> Result<AnalysisConfig> {
    let today = chrono::Local::now().date_naive();

    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            let Some(ticker) = args.ticker.as_deref() else {
                bail!("one of --config or --ticker is required");
            };
            AnalysisConfig::new(ticker, today - chrono::Duration::days(365), today)
        }
    };

    let a = &mut config.analysis;
    if let Some(ticker) = &args.ticker {
        a.ticker = ticker.clone();
    }
    if let Some(start) = &args.start {
        a.start_date = parse_date(start, "--start")?;
    }
    if let Some(end) = &args.end {
        a.end_date = parse_date(end, "--end")?;
    }
    if let Some(v) = args.volume_threshold {
        a.volume_threshold_pct = v;
    }
    if let Some(v) = args.price_threshold {
        a.price_threshold_pct = v;
    }
    if let Some(v) = args.holding_period {
        a.holding_period = v;
    }
    if let Some(v) = args.baseline_window {
        a.baseline_window = v;
    }

    let d = &mut config.data;
    if let Some(days) = args.warmup_days {
        d.warmup_days = Some(days);
    }
    if let Some(path) = &args.csv {
        d.source = "csv".into();
        d.csv_path = Some(path.clone());
    } else if args.synthetic {
        d.source = "synthetic".into();
    }

    config.validate()?;
    Ok(config)
}

fn run_cmd(args: &DataArgs, output_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let config = build_config(args)?;
    let provider = provider_for(&config)?;
    let report = run_report(&config, provider.as_ref())?;

    if json {
        println!("{}", export_json(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&report, &dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn sweep_cmd(args: &DataArgs, grid: &ParamGrid, json: bool) -> Result<()> {
    let config = build_config(args)?;
    let request = config.to_request();
    request.params.validate()?;
    request.range.validate()?;

    let provider = provider_for(&config)?;
    let loaded = load_series(provider.as_ref(), &request)?;
    let rows = breakout_runner::run_sweep(&loaded.series, &request.params, grid);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print_sweep(&request.symbol, &rows);
    if loaded.is_synthetic {
        println!("WARNING: Results based on SYNTHETIC data");
    }
    Ok(())
}

fn download_cmd(
    ticker: &str,
    start: Option<String>,
    end: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let start_date = start
        .as_deref()
        .map(|s| parse_date(s, "--start"))
        .transpose()?
        .unwrap_or_else(|| today - chrono::Duration::days(365 * 10));
    let end_date = end
        .as_deref()
        .map(|s| parse_date(s, "--end"))
        .transpose()?
        .unwrap_or(today);
    if start_date >= end_date {
        bail!("--start ({start_date}) must be before --end ({end_date})");
    }

    let symbol = ticker.trim().to_ascii_uppercase();
    if symbol.is_empty() || !symbol.chars().all(is_ticker_char) {
        bail!("invalid ticker {symbol:?}");
    }
    let provider = YahooProvider::new()?;
    let fetched = provider.fetch(&symbol, start_date, end_date)?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{symbol}.csv")));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_bars_csv(file, &fetched.bars)?;

    info!(symbol = %symbol, bars = fetched.bars.len(), path = %path.display(), "download complete");
    println!("Wrote {} bars to {}", fetched.bars.len(), path.display());
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let r = &report.result;
    let p = &report.params;

    println!();
    println!("=== Breakout Analysis ===");
    println!("Symbol:          {}", report.symbol);
    println!(
        "Period:          {} to {}",
        report.start_date, report.end_date
    );
    println!("Bars:            {} ({} warmup)", r.bar_count, r.warmup_bars);
    println!(
        "Conditions:      volume > {:.1}% above {}-day avg AND change > {:.2}%",
        p.volume_threshold_pct, p.baseline_window, p.price_threshold_pct
    );
    println!("Holding Period:  {} days", p.holding_period);
    println!("Run ID:          {}", r.run_id.short());
    println!();

    match &r.summary {
        None => println!("No breakout conditions found"),
        Some(s) => {
            println!("--- Summary ---");
            println!("Trades:          {}", r.count);
            println!("Win Rate:        {:.1}%", s.win_rate * 100.0);
            println!("Average Return:  {:.2}%", s.mean_return);
            println!("Max Return:      {:.2}%", s.max_return);
            println!("Min Return:      {:.2}%", s.min_return);
            println!("Std Dev:         {:.2}%", s.std_dev_return);
            println!();
            println!(
                "{:<12} {:>10} {:<12} {:>10} {:>9} {:>9} {:>9}",
                "Trigger", "Entry", "Exit Date", "Exit", "Return", "Vol x", "Change"
            );
            for t in &r.trades {
                println!(
                    "{:<12} {:>10.2} {:<12} {:>10.2} {:>8.2}% {:>9.2} {:>8.2}%",
                    t.trigger_date.to_string(),
                    t.entry_price,
                    t.exit_date.to_string(),
                    t.exit_price,
                    t.return_pct,
                    t.volume_ratio,
                    t.price_change_pct
                );
            }
        }
    }

    let ex = &r.exclusions;
    if ex.insufficient_forward_data > 0 {
        println!(
            "NOTE: {} breakout(s) excluded: fewer than {} trading days of data after the trigger",
            ex.insufficient_forward_data, p.holding_period
        );
    }
    if ex.zero_entry_price > 0 {
        println!(
            "NOTE: {} breakout(s) excluded: zero entry price",
            ex.zero_entry_price
        );
    }
    if ex.zero_prior_close > 0 {
        println!(
            "NOTE: {} day(s) skipped: prior close was zero",
            ex.zero_prior_close
        );
    }
    if report.is_synthetic {
        println!();
        println!("WARNING: Results based on SYNTHETIC data");
    }
    println!();
}

fn print_sweep(symbol: &str, rows: &[SweepRow]) {
    println!();
    println!("=== Parameter Sweep: {symbol} ===");
    println!(
        "{:>6} {:>9} {:>9} {:>7} {:>7} {:>9} {:>10} {:>9}",
        "Hold", "Vol %", "Price %", "Events", "Trades", "Win %", "Avg Ret %", "Excluded"
    );
    for row in rows {
        let p = &row.params;
        if let Some(err) = &row.error {
            println!(
                "{:>6} {:>9.1} {:>9.2}  error: {err}",
                p.holding_period, p.volume_threshold_pct, p.price_threshold_pct
            );
            continue;
        }
        println!(
            "{:>6} {:>9.1} {:>9.2} {:>7} {:>7} {:>9} {:>10} {:>9}",
            p.holding_period,
            p.volume_threshold_pct,
            p.price_threshold_pct,
            row.events,
            row.trade_count,
            fmt_opt(row.win_rate.map(|w| w * 100.0), 1),
            fmt_opt(row.mean_return, 2),
            row.excluded
        );
    }

    if let Some(best) = best_by_mean_return(rows) {
        let p = &best.params;
        println!();
        println!(
            "Best average return: hold {} / volume {:.1}% / price {:.2}%",
            p.holding_period, p.volume_threshold_pct, p.price_threshold_pct
        );
    }
    println!();
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
