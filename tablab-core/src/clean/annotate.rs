//! Constant-column tagging.

use polars::prelude::*;

use crate::error::CleanError;

/// Add (or overwrite) a column holding one repeated string value.
///
/// Used to tag downloaded price tables with their asset type and ticker
/// before several of them are concatenated for analysis.
pub fn set_constant_column(
    df: &mut DataFrame,
    name: &str,
    value: &str,
) -> Result<(), CleanError> {
    let height = df.height();
    let values: Vec<&str> = std::iter::repeat(value).take(height).collect();
    df.with_column(Series::new(name.into(), values))?;
    Ok(())
}
