//! Trade simulator: hold each breakout for a fixed number of bars.
//!
//! Entry is the trigger-day close, exit is the close `holding_period` bars later.
//! Events that cannot complete are excluded and counted, never raised.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{BreakoutEvent, Series, Trade};
use crate::error::AnalysisError;

/// Why an event produced no trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Fewer than `holding_period` bars follow the trigger.
    InsufficientForwardData,
    /// Entry price of zero; the return is undefined.
    ZeroEntryPrice,
}

/// Counts of degenerate bars and events left out of a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusions {
    pub insufficient_forward_data: usize,
    pub zero_entry_price: usize,
    pub zero_prior_close: usize,
}

impl Exclusions {
    /// Events that matched both predicates but produced no trade.
    pub fn excluded_events(&self) -> usize {
        self.insufficient_forward_data + self.zero_entry_price
    }

    pub fn total(&self) -> usize {
        self.excluded_events() + self.zero_prior_close
    }

    pub(crate) fn record(&mut self, exclusion: Exclusion) {
        match exclusion {
            Exclusion::InsufficientForwardData => self.insufficient_forward_data += 1,
            Exclusion::ZeroEntryPrice => self.zero_entry_price += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOutcome {
    pub trades: Vec<Trade>,
    pub exclusions: Exclusions,
}

#[derive(Debug, Clone, Copy)]
pub struct TradeSimulator {
    holding_period: usize,
}

impl TradeSimulator {
    pub fn new(holding_period: usize) -> Result<Self, AnalysisError> {
        if holding_period == 0 {
            return Err(AnalysisError::invalid_parameter(
                "holding_period",
                "must be a positive integer",
            ));
        }
        Ok(Self { holding_period })
    }

    pub fn holding_period(&self) -> usize {
        self.holding_period
    }

    pub fn simulate_event(&self, series: &Series, event: &BreakoutEvent) -> Result<Trade, Exclusion> {
        let (exit_bar, exit) = event
            .bar_index
            .checked_add(self.holding_period)
            .and_then(|i| series.get(i).map(|bar| (i, bar)))
            .ok_or(Exclusion::InsufficientForwardData)?;
        if event.entry_price == 0.0 {
            return Err(Exclusion::ZeroEntryPrice);
        }
        Ok(Trade::from_event(event, exit_bar, exit.date, exit.close))
    }

    /// Simulate every event in order. Trades keep the order of their events.
    pub fn simulate(&self, series: &Series, events: &[BreakoutEvent]) -> SimulationOutcome {
        let mut outcome = SimulationOutcome::default();
        for event in events {
            match self.simulate_event(series, event) {
                Ok(trade) => outcome.trades.push(trade),
                Err(exclusion) => {
                    debug!(
                        symbol = series.symbol(),
                        trigger_date = %event.trigger_date,
                        ?exclusion,
                        "event excluded from trade set"
                    );
                    outcome.exclusions.record(exclusion);
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawBar;
    use crate::engine::normalize::normalize;
    use crate::params::DateRange;
    use chrono::NaiveDate;

    fn series_from(closes: &[f64]) -> Series {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let raw = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| RawBar::new(base + chrono::Duration::days(i as i64), c, 1_000))
            .collect();
        let range = DateRange::new(base, base + chrono::Duration::days(10_000));
        normalize("TEST", raw, &range, 1).unwrap().series
    }

    fn event_at(series: &Series, i: usize) -> BreakoutEvent {
        let bar = series.bars()[i];
        BreakoutEvent {
            bar_index: i,
            trigger_date: bar.date,
            entry_price: bar.close,
            volume: bar.volume,
            baseline_volume: 1_000.0,
            volume_ratio: 1.0,
            price_change_pct: 0.0,
        }
    }

    #[test]
    fn exits_holding_period_bars_later() {
        let series = series_from(&[100.0, 100.0, 110.0, 120.0, 132.0]);
        let sim = TradeSimulator::new(2).unwrap();
        let trade = sim.simulate_event(&series, &event_at(&series, 2)).unwrap();

        assert_eq!(trade.exit_bar, 4);
        assert_eq!(trade.exit_date, series.bars()[4].date);
        assert_eq!(trade.exit_price, 132.0);
        assert!((trade.return_pct - 20.0).abs() < 1e-10);
    }

    #[test]
    fn last_bar_exit_is_in_bounds() {
        let series = series_from(&[100.0, 100.0, 110.0, 121.0]);
        let sim = TradeSimulator::new(1).unwrap();
        assert!(sim.simulate_event(&series, &event_at(&series, 2)).is_ok());
    }

    #[test]
    fn missing_forward_window_is_excluded() {
        let series = series_from(&[100.0, 100.0, 110.0, 121.0]);
        let sim = TradeSimulator::new(2).unwrap();
        assert_eq!(
            sim.simulate_event(&series, &event_at(&series, 2)),
            Err(Exclusion::InsufficientForwardData)
        );
    }

    #[test]
    fn huge_holding_period_is_missing_forward_data() {
        let series = series_from(&[100.0, 100.0, 110.0, 121.0]);
        let sim = TradeSimulator::new(usize::MAX).unwrap();
        let outcome = sim.simulate(&series, &[event_at(&series, 2)]);

        assert!(outcome.trades.is_empty());
        assert_eq!(outcome.exclusions.insufficient_forward_data, 1);
    }

    #[test]
    fn zero_entry_price_is_excluded() {
        let series = series_from(&[100.0, 0.0, 10.0, 20.0]);
        let sim = TradeSimulator::new(1).unwrap();
        assert_eq!(
            sim.simulate_event(&series, &event_at(&series, 1)),
            Err(Exclusion::ZeroEntryPrice)
        );
    }

    #[test]
    fn simulate_counts_each_exclusion_kind() {
        let series = series_from(&[100.0, 0.0, 10.0, 20.0, 30.0]);
        let sim = TradeSimulator::new(2).unwrap();
        let events: Vec<_> = [1, 2, 3, 4].iter().map(|&i| event_at(&series, i)).collect();
        let outcome = sim.simulate(&series, &events);

        assert_eq!(outcome.trades.len(), 1);
        assert_eq!(outcome.trades[0].entry_bar, 2);
        assert_eq!(outcome.exclusions.zero_entry_price, 1);
        assert_eq!(outcome.exclusions.insufficient_forward_data, 2);
        assert_eq!(outcome.exclusions.excluded_events(), 3);
    }

    #[test]
    fn zero_holding_period_rejected() {
        assert!(matches!(
            TradeSimulator::new(0),
            Err(AnalysisError::InvalidParameter {
                name: "holding_period",
                ..
            })
        ));
    }
}
