//! Analysis engine: the pure, deterministic half of the system.
//!
//! Stages, in order:
//!
//! 1. Normalize: raw provider records into a sorted, deduplicated [`Series`](crate::domain::Series)
//! 2. Scan: trailing volume baseline plus price change, both predicates ANDed
//! 3. Simulate: fixed holding-period trade per event
//! 4. Aggregate: summary statistics over trade returns
//!
//! No stage performs I/O.

pub mod normalize;
pub mod pipeline;
pub mod scanner;
pub mod simulator;
pub mod stats;

pub use normalize::{normalize, NormalizeReport, Normalized};
pub use pipeline::{analyze_series, run_analysis, AnalysisResult};
pub use scanner::{BreakoutScanner, ScanOutcome};
pub use simulator::{Exclusion, Exclusions, SimulationOutcome, TradeSimulator};
pub use stats::SummaryStats;
