//! Text cleanups: suffix truncation, character removal, whitespace stripping.

use polars::prelude::*;

use super::checked_column;
use crate::error::CleanError;

/// Convert `col` to text and drop the trailing `n` characters from each value.
///
/// Character-based, not byte-based. A value shorter than (or equal to) `n`
/// characters becomes the empty string; `n == 0` leaves values unchanged.
/// The column's dtype is `String` afterwards even when `n == 0`, since the
/// operation stringifies first.
pub fn truncate_column_suffix(
    df: &mut DataFrame,
    col: &str,
    n: usize,
) -> Result<(), CleanError> {
    rewrite_as_text(df, col, |value| {
        let len = value.chars().count();
        if n >= len {
            String::new()
        } else {
            value.chars().take(len - n).collect()
        }
    })
}

/// Convert `col` to text and remove every occurrence of the character `ch`.
///
/// Used on the raw loan data to drop the `'+'` marker from `"3+"` dependents.
pub fn strip_character(df: &mut DataFrame, col: &str, ch: char) -> Result<(), CleanError> {
    rewrite_as_text(df, col, |value| value.replace(ch, ""))
}

/// Trim leading and trailing whitespace from every string cell in the table.
///
/// Non-string columns pass through unchanged.
pub fn strip_whitespace_all(df: &mut DataFrame) -> Result<(), CleanError> {
    let string_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .collect();

    for name in string_cols {
        let series = df
            .column(&name)?
            .as_materialized_series()
            .clone();
        let trimmed: Vec<Option<String>> = series
            .str()?
            .into_iter()
            .map(|opt| opt.map(|v| v.trim().to_string()))
            .collect();
        df.replace(&name, Series::new(name.as_str().into(), trimmed))?;
    }
    Ok(())
}

/// Stringify `col` and rewrite each non-null value through `f`.
fn rewrite_as_text(
    df: &mut DataFrame,
    col: &str,
    f: impl Fn(&str) -> String,
) -> Result<(), CleanError> {
    let series = checked_column(df, col)?
        .as_materialized_series()
        .cast(&DataType::String)?;

    let rewritten: Vec<Option<String>> = series
        .str()?
        .into_iter()
        .map(|opt| opt.map(&f))
        .collect();

    df.replace(col, Series::new(col.into(), rewritten))?;
    Ok(())
}
