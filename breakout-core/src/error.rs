//! Error taxonomy for a single analysis run.
//!
//! Every variant is detected at the boundary of one pipeline run and carries no
//! partial result. Degenerate bars (zero prior close, zero entry price, missing
//! forward window) are not errors; they are counted in
//! [`Exclusions`](crate::engine::Exclusions) instead.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid date range: start {start} must be strictly before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error(
        "insufficient data: {available} bars available, at least {required} required \
         (baseline_window + 1)"
    )]
    InsufficientData { available: usize, required: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl AnalysisError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
