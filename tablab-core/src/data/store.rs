//! CSV store for downloaded price series.
//!
//! Layout: `{data_dir}/{TICKER}_historical_data.csv` with a `{TICKER}_meta.json`
//! sidecar recording the date range, row count, and a blake3 content hash.
//! Writes are atomic: the CSV goes to a `.tmp` file first and is renamed
//! into place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::provider::{DataError, PriceBar};

/// Metadata sidecar for one stored ticker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMeta {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub row_count: usize,
    pub data_hash: String,
    pub source: String,
    pub stored_at: chrono::NaiveDateTime,
}

/// The CSV store.
pub struct CsvStore {
    data_dir: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the CSV file for a ticker.
    pub fn csv_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}_historical_data.csv"))
    }

    fn meta_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{ticker}_meta.json"))
    }

    /// Whether a series for this ticker is already on disk.
    pub fn exists(&self, ticker: &str) -> bool {
        self.csv_path(ticker).exists()
    }

    /// Write a fetched series, replacing any previous file for the ticker.
    pub fn write(&self, ticker: &str, source: &str, bars: &[PriceBar]) -> Result<(), DataError> {
        if bars.is_empty() {
            return Err(DataError::StoreError("no bars to store".into()));
        }

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| DataError::StoreError(format!("failed to create data dir: {e}")))?;

        let path = self.csv_path(ticker);
        let tmp_path = path.with_extension("csv.tmp");
        write_csv(&tmp_path, bars)?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::StoreError(format!("atomic rename failed: {e}"))
        })?;

        let meta = StoreMeta {
            ticker: ticker.to_string(),
            start_date: bars.first().map(|b| b.date).unwrap_or_default(),
            end_date: bars.last().map(|b| b.date).unwrap_or_default(),
            row_count: bars.len(),
            data_hash: blake3::hash(
                &serde_json::to_vec(bars)
                    .map_err(|e| DataError::StoreError(format!("hash serialization: {e}")))?,
            )
            .to_hex()
            .to_string(),
            source: source.to_string(),
            stored_at: chrono::Local::now().naive_local(),
        };
        let meta_json = serde_json::to_string_pretty(&meta)
            .map_err(|e| DataError::StoreError(format!("meta serialization: {e}")))?;
        fs::write(self.meta_path(ticker), meta_json)
            .map_err(|e| DataError::StoreError(format!("meta write: {e}")))?;

        Ok(())
    }

    /// Rewrite a ticker's CSV from a table, atomically.
    ///
    /// Used after post-download transforms such as tagging the series with
    /// its asset type; the metadata sidecar is left as written at download
    /// time.
    pub fn write_table(&self, ticker: &str, df: &mut DataFrame) -> Result<(), DataError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| DataError::StoreError(format!("failed to create data dir: {e}")))?;

        let path = self.csv_path(ticker);
        let tmp_path = path.with_extension("csv.tmp");
        let file = fs::File::create(&tmp_path)
            .map_err(|e| DataError::StoreError(format!("create file: {e}")))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .map_err(|e| DataError::StoreError(format!("write csv: {e}")))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DataError::StoreError(format!("atomic rename failed: {e}"))
        })?;
        Ok(())
    }

    /// Load a stored series back as a table.
    pub fn load(&self, ticker: &str) -> Result<DataFrame, DataError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Err(DataError::StoreError(format!(
                "no stored data for ticker '{ticker}'"
            )));
        }
        super::ingest::read_csv(&path)
            .map_err(|e| DataError::StoreError(format!("load {ticker}: {e}")))
    }

    /// Read the metadata sidecar, if present and parseable.
    pub fn meta(&self, ticker: &str) -> Option<StoreMeta> {
        let content = fs::read_to_string(self.meta_path(ticker)).ok()?;
        serde_json::from_str(&content).ok()
    }
}

fn write_csv(path: &Path, bars: &[PriceBar]) -> Result<(), DataError> {
    let file = fs::File::create(path)
        .map_err(|e| DataError::StoreError(format!("create file: {e}")))?;
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["date", "open", "high", "low", "close", "adj_close", "volume"])
        .map_err(|e| DataError::StoreError(format!("write header: {e}")))?;

    for bar in bars {
        wtr.write_record([
            bar.date.format("%Y-%m-%d").to_string(),
            bar.open.to_string(),
            bar.high.to_string(),
            bar.low.to_string(),
            bar.close.to_string(),
            bar.adj_close.to_string(),
            bar.volume.to_string(),
        ])
        .map_err(|e| DataError::StoreError(format!("write row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| DataError::StoreError(format!("flush: {e}")))?;
    Ok(())
}
