//! tablab CLI — download and clean commands.
//!
//! Commands:
//! - `download` — fetch daily price history from Yahoo Finance and store it
//!   as `{TICKER}_historical_data.csv`
//! - `clean` — load a CSV, run a sequence of cleaning operations, write the
//!   result back out

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use polars::prelude::*;
use tablab_core::clean::{
    self, map_binary_labels, normalize_column_names, rename_columns_positional,
    strip_character, strip_whitespace_all, truncate_column_suffix, Label, LabelMapping,
};
use tablab_core::data::{
    download_tickers, read_csv, tag_stored_series, CsvStore, StdoutProgress, YahooProvider,
};
use tablab_core::schema::LOAN_APPLICATION_COLUMNS;

#[derive(Parser)]
#[command(name = "tablab", about = "tablab — tabular cleaning and price downloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download daily price history from Yahoo Finance and store as CSV.
    Download {
        /// Tickers to download (e.g., SPY QQQ AAPL).
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Start date (YYYY-MM-DD). Defaults to 2 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Re-download even if a stored file exists.
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Data directory. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Tag each stored series with constant `type` and `ticker` columns
        /// (e.g. --type-tag etf).
        #[arg(long, value_name = "TYPE")]
        type_tag: Option<String>,
    },
    /// Load a CSV, apply cleaning operations, write the result.
    Clean {
        /// Input CSV path.
        #[arg(long)]
        input: PathBuf,

        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,

        /// Rename all columns positionally to the canonical loan-application
        /// schema (gender, married, ..., loan_status).
        #[arg(long, default_value_t = false)]
        loan_columns: bool,

        /// Drop the trailing N characters of a column: `col:N`.
        #[arg(long, value_name = "COL:N")]
        truncate: Vec<String>,

        /// Remove a character from a column: `col:c`.
        #[arg(long, value_name = "COL:CHAR")]
        strip_char: Vec<String>,

        /// Cast columns to float (comma-separated names).
        #[arg(long, value_delimiter = ',')]
        to_float: Vec<String>,

        /// Multiply a column: `col:FACTOR`.
        #[arg(long, value_name = "COL:FACTOR")]
        scale: Vec<String>,

        /// Substitute labels in a column: `col:KEY=VAL,KEY=VAL`.
        /// Integer VALs produce an integer column when coverage is total.
        #[arg(long, value_name = "COL:K=V,...")]
        map: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Download {
            tickers,
            start,
            end,
            force,
            data_dir,
            type_tag,
        } => run_download(tickers, start, end, force, data_dir, type_tag),
        Commands::Clean {
            input,
            output,
            loan_columns,
            truncate,
            strip_char,
            to_float,
            scale,
            map,
        } => run_clean(CleanArgs {
            input,
            output,
            loan_columns,
            truncate,
            strip_char,
            to_float,
            scale,
            map,
        }),
    }
}

fn run_download(
    tickers: Vec<String>,
    start: Option<String>,
    end: Option<String>,
    force: bool,
    data_dir: PathBuf,
    type_tag: Option<String>,
) -> Result<()> {
    let start_date = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive() - chrono::Duration::days(365 * 2));

    let end_date = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let provider = YahooProvider::new()?;
    let store = CsvStore::new(data_dir);
    let ticker_refs: Vec<&str> = tickers.iter().map(|t| t.as_str()).collect();

    let summary = download_tickers(
        &provider,
        &store,
        &ticker_refs,
        start_date,
        end_date,
        force,
        &StdoutProgress,
    );

    if let Some(tag) = &type_tag {
        for ticker in &ticker_refs {
            if store.exists(ticker) {
                tag_stored_series(&store, ticker, tag)
                    .with_context(|| format!("failed to tag {ticker}"))?;
                println!("Tagged {ticker} as '{tag}'");
            }
        }
    }

    if !summary.all_succeeded() {
        for (ticker, err) in &summary.errors {
            eprintln!("Error for {ticker}: {err}");
        }
        std::process::exit(1);
    }
    Ok(())
}

struct CleanArgs {
    input: PathBuf,
    output: PathBuf,
    loan_columns: bool,
    truncate: Vec<String>,
    strip_char: Vec<String>,
    to_float: Vec<String>,
    scale: Vec<String>,
    map: Vec<String>,
}

fn run_clean(args: CleanArgs) -> Result<()> {
    let mut df = read_csv(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let rows = df.height();

    // Headers and whitespace are always tidied; the rest is opt-in.
    normalize_column_names(&mut df)?;
    if args.loan_columns {
        rename_columns_positional(&mut df, &LOAN_APPLICATION_COLUMNS)?;
    }
    strip_whitespace_all(&mut df)?;

    for spec in &args.truncate {
        let (col, n) = split_spec(spec)?;
        let n: usize = n.parse().with_context(|| format!("bad count in '{spec}'"))?;
        truncate_column_suffix(&mut df, col, n)?;
    }

    for spec in &args.strip_char {
        let (col, ch) = split_spec(spec)?;
        let mut chars = ch.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            bail!("expected a single character in '{spec}'");
        };
        strip_character(&mut df, col, ch)?;
    }

    if !args.to_float.is_empty() {
        let cols: Vec<&str> = args.to_float.iter().map(|c| c.as_str()).collect();
        clean::cast_columns_to_float(&mut df, &cols)?;
    }

    for spec in &args.scale {
        let (col, factor) = split_spec(spec)?;
        let factor: f64 = factor
            .parse()
            .with_context(|| format!("bad factor in '{spec}'"))?;
        clean::scale_column(&mut df, col, factor)?;
    }

    for spec in &args.map {
        let (col, pairs) = split_spec(spec)?;
        let mapping = parse_mapping(pairs)?;
        map_binary_labels(&mut df, col, &mapping)?;
    }

    write_csv(&mut df, &args.output)?;
    println!(
        "Cleaned {} rows, {} columns -> {}",
        rows,
        df.width(),
        args.output.display()
    );
    Ok(())
}

/// Split a `col:rest` argument at the first colon.
fn split_spec(spec: &str) -> Result<(&str, &str)> {
    spec.split_once(':')
        .filter(|(col, rest)| !col.is_empty() && !rest.is_empty())
        .with_context(|| format!("expected 'col:value', got '{spec}'"))
}

/// Parse `KEY=VAL,KEY=VAL` into a mapping; integer VALs become int targets.
fn parse_mapping(pairs: &str) -> Result<LabelMapping> {
    let mut entries: Vec<(String, Label)> = Vec::new();
    for pair in pairs.split(',') {
        let Some((key, val)) = pair.split_once('=') else {
            bail!("expected 'KEY=VAL', got '{pair}'");
        };
        let label = match val.parse::<i64>() {
            Ok(i) => Label::Int(i),
            Err(_) => Label::Str(val.to_string()),
        };
        entries.push((key.to_string(), label));
    }
    Ok(entries.into_iter().collect())
}

fn write_csv(df: &mut DataFrame, path: &PathBuf) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablab_core::clean::label_mapping;

    #[test]
    fn split_spec_splits_at_first_colon() {
        assert_eq!(split_spec("term:3").unwrap(), ("term", "3"));
        assert_eq!(
            split_spec("status:Y=Approved,N=Rejected").unwrap(),
            ("status", "Y=Approved,N=Rejected")
        );
        assert!(split_spec("broken").is_err());
        assert!(split_spec(":3").is_err());
    }

    #[test]
    fn parse_mapping_detects_integer_targets() {
        let mapping = parse_mapping("Yes=1,No=0").unwrap();
        assert_eq!(mapping.get("Yes"), Some(&Label::Int(1)));
        assert_eq!(mapping.get("No"), Some(&Label::Int(0)));

        let mapping = parse_mapping("Y=Approved").unwrap();
        assert_eq!(
            mapping.get("Y"),
            Some(&Label::Str("Approved".to_string()))
        );
    }

    #[test]
    fn parse_mapping_rejects_malformed_pairs() {
        assert!(parse_mapping("YesNo").is_err());
    }

    #[test]
    fn label_mapping_helper_matches_cli_parse() {
        let built = label_mapping([("Yes", 1i64), ("No", 0)]);
        let parsed = parse_mapping("Yes=1,No=0").unwrap();
        assert_eq!(built, parsed);
    }
}
