//! Price history download and storage.

pub mod download;
pub mod ingest;
pub mod provider;
pub mod store;
pub mod yahoo;

pub use download::{download_tickers, tag_stored_series, DownloadSummary};
pub use ingest::read_csv;
pub use provider::{
    DataError, DataProvider, DownloadProgress, FetchResult, PriceBar, StdoutProgress,
};
pub use store::{CsvStore, StoreMeta};
pub use yahoo::YahooProvider;
