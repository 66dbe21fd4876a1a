//! Bar — one trading day of a single symbol.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily observation. `close` is the adjusted close; all returns use it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64, volume: u64) -> Self {
        Self {
            date,
            close,
            volume,
        }
    }

    /// A usable close: finite and not negative. Zero is allowed and handled
    /// downstream as a degenerate price.
    pub fn has_usable_close(&self) -> bool {
        self.close.is_finite() && self.close >= 0.0
    }
}
