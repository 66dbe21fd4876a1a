//! Trade — the simulated outcome of holding from a breakout for a fixed period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::BreakoutEvent;

/// A completed hold: entry at the trigger close, exit `holding_period` bars later.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trigger_date: NaiveDate,
    pub entry_bar: usize,
    pub entry_price: f64,

    pub exit_bar: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    /// `(exit - entry) / entry * 100`.
    pub return_pct: f64,

    #[serde(with = "super::event::unbounded_ratio")]
    pub volume_ratio: f64,
    pub price_change_pct: f64,
}

impl Trade {
    pub(crate) fn from_event(
        event: &BreakoutEvent,
        exit_bar: usize,
        exit_date: NaiveDate,
        exit_price: f64,
    ) -> Self {
        Self {
            trigger_date: event.trigger_date,
            entry_bar: event.bar_index,
            entry_price: event.entry_price,
            exit_bar,
            exit_date,
            exit_price,
            return_pct: (exit_price - event.entry_price) / event.entry_price * 100.0,
            volume_ratio: event.volume_ratio,
            price_change_pct: event.price_change_pct,
        }
    }

    pub fn bars_held(&self) -> usize {
        self.exit_bar - self.entry_bar
    }

    pub fn is_winner(&self) -> bool {
        self.return_pct > 0.0
    }
}
