//! CSV import/export of daily bars.
//!
//! The canonical layout is `date,close,volume`. Files exported from Yahoo Finance
//! (`Date,Open,High,Low,Close,Adj Close,Volume`) are accepted too: the adjusted
//! close wins over the raw close when both columns are present.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, String> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().to_ascii_lowercase();
                names.iter().any(|n| *n == h)
            })
        };

        let date = find(&["date", "timestamp"]).ok_or("missing `date` column")?;
        let close = find(&["adj close", "adj_close", "adjclose"])
            .or_else(|| find(&["close"]))
            .ok_or("missing `close` column")?;
        let volume = find(&["volume"]).ok_or("missing `volume` column")?;

        Ok(Self {
            date,
            close,
            volume,
        })
    }
}

/// Read bars from any CSV source. `origin` only labels error messages.
pub fn read_bars_csv<R: Read>(reader: R, origin: &str) -> Result<Vec<RawBar>, DataError> {
    let csv_err = |reason: String| DataError::Csv {
        path: origin.to_string(),
        reason,
    };

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(|e| csv_err(e.to_string()))?.clone();
    let cols = Columns::resolve(&headers).map_err(|e| csv_err(e.to_string()))?;

    let mut bars = Vec::new();
    for (row_idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| csv_err(format!("row {}: {e}", row_idx + 1)))?;
        let field = |i: usize, name: &str| {
            record
                .get(i)
                .ok_or_else(|| csv_err(format!("row {}: missing {name}", row_idx + 1)))
        };

        let date_str = field(cols.date, "date")?;
        // Accept bare dates and "YYYY-MM-DD HH:MM:SS..." timestamps
        let date = NaiveDate::parse_from_str(date_str.get(..10).unwrap_or(date_str), "%Y-%m-%d")
            .map_err(|e| csv_err(format!("row {}: bad date {date_str:?}: {e}", row_idx + 1)))?;

        let close_str = field(cols.close, "close")?;
        let close = if close_str.is_empty() || close_str.eq_ignore_ascii_case("null") {
            f64::NAN
        } else {
            close_str.parse::<f64>().map_err(|e| {
                csv_err(format!("row {}: bad close {close_str:?}: {e}", row_idx + 1))
            })?
        };

        let volume_str = field(cols.volume, "volume")?;
        let volume = if volume_str.is_empty() || volume_str.eq_ignore_ascii_case("null") {
            0
        } else {
            // Some exports write volume as a float ("1234.0")
            let v = volume_str.parse::<f64>().map_err(|e| {
                csv_err(format!("row {}: bad volume {volume_str:?}: {e}", row_idx + 1))
            })?;
            if !v.is_finite() || v < 0.0 {
                return Err(csv_err(format!(
                    "row {}: volume must be a non-negative number, got {volume_str}",
                    row_idx + 1
                )));
            }
            v.round() as u64
        };

        bars.push(RawBar {
            date,
            close,
            volume,
        });
    }

    Ok(bars)
}

/// Write bars in the canonical `date,close,volume` layout.
pub fn write_bars_csv<W: Write>(writer: W, bars: &[RawBar]) -> Result<(), DataError> {
    let csv_err = |e: csv::Error| DataError::Csv {
        path: "<output>".into(),
        reason: e.to_string(),
    };

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "close", "volume"]).map_err(csv_err)?;
    for bar in bars {
        wtr.write_record([
            bar.date.to_string(),
            format!("{}", bar.close),
            bar.volume.to_string(),
        ])
        .map_err(csv_err)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Provider backed by a single CSV file holding one symbol's history.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let file = std::fs::File::open(&self.path)?;
        let all = read_bars_csv(file, &self.path.display().to_string())?;
        let total = all.len();
        let bars: Vec<RawBar> = all
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();
        debug!(
            symbol,
            path = %self.path.display(),
            total,
            in_range = bars.len(),
            "loaded CSV bars"
        );

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reads_canonical_layout() {
        let data = "date,close,volume\n2024-01-02,101.5,1000\n2024-01-03,102.0,1100\n";
        let bars = read_bars_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0], RawBar::new(date(2024, 1, 2), 101.5, 1000));
        assert_eq!(bars[1].volume, 1100);
    }

    #[test]
    fn prefers_adjusted_close_in_yahoo_layout() {
        let data = "Date,Open,High,Low,Close,Adj Close,Volume\n\
                    2024-01-02,100,103,99,102,101.25,5000.0\n";
        let bars = read_bars_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(bars[0].close, 101.25);
        assert_eq!(bars[0].volume, 5000);
    }

    #[test]
    fn accepts_timestamps_and_null_closes() {
        let data = "date,close,volume\n2024-01-02 00:00:00-05:00,null,10\n";
        let bars = read_bars_csv(data.as_bytes(), "inline").unwrap();
        assert_eq!(bars[0].date, date(2024, 1, 2));
        assert!(bars[0].close.is_nan());
    }

    #[test]
    fn missing_volume_column_is_an_error() {
        let data = "date,close\n2024-01-02,1.0\n";
        let err = read_bars_csv(data.as_bytes(), "bars.csv").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bars.csv"));
        assert!(msg.contains("volume"));
    }

    #[test]
    fn negative_volume_is_an_error() {
        let data = "date,close,volume\n2024-01-02,1.0,-5\n";
        assert!(read_bars_csv(data.as_bytes(), "inline").is_err());
    }

    #[test]
    fn write_then_read_preserves_bars() {
        let bars = vec![
            RawBar::new(date(2024, 1, 2), 101.5, 1000),
            RawBar::new(date(2024, 1, 3), 99.75, 0),
        ];
        let mut buf = Vec::new();
        write_bars_csv(&mut buf, &bars).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("date,close,volume\n"));
        assert_eq!(read_bars_csv(buf.as_slice(), "inline").unwrap(), bars);
    }

    #[test]
    fn provider_filters_to_requested_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("X.csv");
        std::fs::write(
            &path,
            "date,close,volume\n2024-01-02,1,1\n2024-01-03,2,2\n2024-01-04,3,3\n",
        )
        .unwrap();

        let provider = CsvProvider::new(&path);
        assert!(provider.is_available());
        let fetched = provider
            .fetch("X", date(2024, 1, 3), date(2024, 1, 10))
            .unwrap();
        assert_eq!(fetched.source, DataSource::CsvImport);
        assert_eq!(fetched.bars.len(), 2);
        assert_eq!(fetched.bars[0].close, 2.0);
    }

    #[test]
    fn missing_file_is_unavailable() {
        let provider = CsvProvider::new("/definitely/not/here.csv");
        assert!(!provider.is_available());
        assert!(provider
            .fetch("X", date(2024, 1, 1), date(2024, 2, 1))
            .is_err());
    }
}
