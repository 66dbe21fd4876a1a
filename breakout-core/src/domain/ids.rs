use serde::{Deserialize, Serialize};
use std::fmt;

use crate::params::AnalysisParams;

/// Deterministic dataset hash (content hash of a normalized series)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetHash(pub String);

impl DatasetHash {
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }
}

impl fmt::Display for DatasetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic run ID (params + dataset)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    /// Uses BLAKE3 over a canonical JSON rendering so the id is stable across
    /// builds and platforms.
    pub fn derive(params: &AnalysisParams, dataset_hash: &DatasetHash) -> Self {
        use serde_json::json;

        let canonical = json!({
            "baseline_window": params.baseline_window,
            "dataset_hash": &dataset_hash.0,
            "holding_period": params.holding_period,
            "price_threshold_pct": params.price_threshold_pct,
            "volume_threshold_pct": params.volume_threshold_pct,
        });

        Self(blake3::hash(canonical.to_string().as_bytes()).to_hex().to_string())
    }

    /// First 12 hex characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_deterministic() {
        let params = AnalysisParams::default();
        let run1 = RunId::derive(&params, &DatasetHash::from_hash("def456"));
        let run2 = RunId::derive(&params, &DatasetHash::from_hash("def456"));
        assert_eq!(run1, run2);
        assert_eq!(run1.short().len(), 12);
    }

    #[test]
    fn test_run_id_changes_with_params() {
        let dataset = DatasetHash::from_hash("def456");
        let run1 = RunId::derive(&AnalysisParams::default(), &dataset);
        let run2 = RunId::derive(
            &AnalysisParams {
                holding_period: 3,
                ..Default::default()
            },
            &dataset,
        );
        assert_ne!(run1, run2);
    }
}
