//! BreakoutEvent — a day on which both breakout predicates held.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutEvent {
    /// Position of the trigger bar in its series.
    pub bar_index: usize,
    pub trigger_date: NaiveDate,
    /// Close on the trigger date.
    pub entry_price: f64,
    pub volume: u64,
    /// Trailing average volume the trigger day was compared against.
    pub baseline_volume: f64,
    /// `volume / baseline_volume`. Infinite when the baseline is zero.
    #[serde(with = "unbounded_ratio")]
    pub volume_ratio: f64,
    /// Close-over-close change on the trigger day, in percent.
    pub price_change_pct: f64,
}

/// JSON has no infinity: an unbounded ratio is written as `null` and read back
/// as `f64::INFINITY`.
pub(crate) mod unbounded_ratio {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_baseline_ratio_survives_json() {
        let event = BreakoutEvent {
            bar_index: 20,
            trigger_date: NaiveDate::from_ymd_opt(2024, 1, 21).unwrap(),
            entry_price: 10.0,
            volume: 500,
            baseline_volume: 0.0,
            volume_ratio: f64::INFINITY,
            price_change_pct: 5.0,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"volume_ratio\":null"));
        let back: BreakoutEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
