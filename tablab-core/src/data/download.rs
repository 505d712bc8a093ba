//! Download orchestrator — fetch each ticker and persist it as CSV.

use chrono::NaiveDate;

use super::provider::{DataError, DataProvider, DownloadProgress};
use super::store::CsvStore;
use crate::clean::set_constant_column;

/// Download several tickers through `provider` and write each to `store`.
///
/// Unless `force` is set, tickers that already have a stored file are
/// skipped. Failures are collected rather than aborting the batch; the
/// summary says which tickers failed and why.
pub fn download_tickers(
    provider: &dyn DataProvider,
    store: &CsvStore,
    tickers: &[&str],
    start: NaiveDate,
    end: NaiveDate,
    force: bool,
    progress: &dyn DownloadProgress,
) -> DownloadSummary {
    let total = tickers.len();
    let mut succeeded = 0;
    let mut failed = 0;
    let mut errors: Vec<(String, DataError)> = Vec::new();

    for (i, ticker) in tickers.iter().enumerate() {
        progress.on_start(ticker, i, total);

        if !force && store.exists(ticker) {
            progress.on_complete(ticker, &Ok(()));
            succeeded += 1;
            continue;
        }

        let result = download_single(provider, store, ticker, start, end);
        progress.on_complete(ticker, &result);
        match result {
            Ok(()) => succeeded += 1,
            Err(e) => {
                errors.push((ticker.to_string(), e));
                failed += 1;
            }
        }
    }

    progress.on_batch_complete(succeeded, failed, total);

    DownloadSummary {
        total,
        succeeded,
        failed,
        errors,
    }
}

fn download_single(
    provider: &dyn DataProvider,
    store: &CsvStore,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), DataError> {
    let fetched = provider.fetch(ticker, start, end)?;
    store.write(ticker, provider.name(), &fetched.bars)?;
    Ok(())
}

/// Tag a stored series with constant `type` and `ticker` columns, so several
/// series can be concatenated for analysis and still told apart.
pub fn tag_stored_series(
    store: &CsvStore,
    ticker: &str,
    type_tag: &str,
) -> Result<(), DataError> {
    let mut df = store.load(ticker)?;
    set_constant_column(&mut df, "type", type_tag)
        .map_err(|e| DataError::StoreError(format!("tagging {ticker}: {e}")))?;
    set_constant_column(&mut df, "ticker", ticker)
        .map_err(|e| DataError::StoreError(format!("tagging {ticker}: {e}")))?;
    store.write_table(ticker, &mut df)
}

/// Summary of a batch download.
#[derive(Debug)]
pub struct DownloadSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<(String, DataError)>,
}

impl DownloadSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
