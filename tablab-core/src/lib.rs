//! tablab-core — tabular cleaning operations and a price download pipeline.
//!
//! The cleaning half is a set of stateless operations over one in-memory
//! Polars [`DataFrame`](polars::prelude::DataFrame): rename and normalize
//! headers, strip text, coerce types, substitute categorical labels, and
//! resample synthetic columns from an empirical distribution. Each operation
//! mutates the caller's table in place, preserves row count and order, and
//! leaves the table unmodified on error.
//!
//! The data half fetches daily OHLCV history for a ticker from Yahoo Finance
//! and persists it as delimited text named by the ticker, with a metadata
//! sidecar.

pub mod clean;
pub mod data;
pub mod error;
pub mod schema;

pub use error::CleanError;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: public types stay Send + Sync, so tables and
    /// results can cross thread boundaries when callers parallelize over
    /// independent tables.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<CleanError>();
        require_sync::<CleanError>();
        require_send::<clean::Label>();
        require_sync::<clean::Label>();
        require_send::<clean::LabelMapping>();
        require_sync::<clean::LabelMapping>();
        require_send::<data::PriceBar>();
        require_sync::<data::PriceBar>();
        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::DownloadSummary>();
        require_sync::<data::DownloadSummary>();
        require_send::<data::StoreMeta>();
        require_sync::<data::StoreMeta>();
    }
}
