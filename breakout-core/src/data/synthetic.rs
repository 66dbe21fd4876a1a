//! Synthetic bars for offline development.
//!
//! Produces a deterministic random walk per symbol (seeded from a BLAKE3 hash of
//! the symbol name) with occasional volume spikes on strong up days, so the
//! breakout scanner has something to find. These bars are clearly fake and every
//! result built on them is tagged as synthetic.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};

/// Probability that a trading day carries a volume spike.
const SPIKE_PROBABILITY: f64 = 0.04;

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    /// Extra seed material; `None` derives the seed from the symbol alone.
    salt: Option<u64>,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_salt(salt: u64) -> Self {
        Self { salt: Some(salt) }
    }

    fn seed(&self, symbol: &str) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(symbol.as_bytes());
        if let Some(salt) = self.salt {
            hasher.update(&salt.to_le_bytes());
        }
        *hasher.finalize().as_bytes()
    }

    /// Generate weekday bars in `[start, end]`.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<RawBar> {
        let mut rng = StdRng::from_seed(self.seed(symbol));

        let mut bars = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                current += chrono::Duration::days(1);
                continue;
            }

            let spike = rng.gen_bool(SPIKE_PROBABILITY);
            let daily_return: f64 = if spike {
                rng.gen_range(0.02..0.06)
            } else {
                rng.gen_range(-0.025..0.025)
            };
            let base_volume = rng.gen_range(800_000..1_200_000u64);
            let volume = if spike {
                base_volume * rng.gen_range(2..5u64)
            } else {
                base_volume
            };

            price *= 1.0 + daily_return;
            bars.push(RawBar {
                date: current,
                close: price,
                volume,
            });

            current += chrono::Duration::days(1);
        }

        bars
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        warn!(symbol, "generating synthetic data; results will be tagged as synthetic");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars: self.generate(symbol, start, end),
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}
