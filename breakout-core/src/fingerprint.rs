//! Run fingerprinting — deterministic identification of datasets and runs.
//!
//! - `DatasetHash`: BLAKE3 over the normalized bars (symbol, dates, closes, volumes).
//! - `RunId`: BLAKE3 over the parameters plus the dataset hash.
//!
//! Identical `(series, params)` always produce identical ids, so two reports can
//! be compared by id alone.

use crate::domain::{DatasetHash, RunId, Series};
use crate::params::AnalysisParams;

pub fn dataset_hash(series: &Series) -> DatasetHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(series.symbol().as_bytes());
    hasher.update(series.analysis_start().to_string().as_bytes());
    for bar in series.bars() {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

pub fn run_id(series: &Series, params: &AnalysisParams) -> RunId {
    RunId::derive(params, &dataset_hash(series))
}
