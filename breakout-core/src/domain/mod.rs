//! Domain types for the breakout engine

pub mod bar;
pub mod event;
pub mod ids;
pub mod series;
pub mod trade;

pub use bar::Bar;
pub use event::BreakoutEvent;
pub use ids::{DatasetHash, RunId};
pub use series::Series;
pub use trade::Trade;
