//! Market data providers.

pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use csv_import::{read_bars_csv, write_bars_csv, CsvProvider};
pub use provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
