//! Stateless cleaning operations over an in-memory [`DataFrame`].
//!
//! Each operation mutates one caller-owned table in place and returns
//! `Result<(), CleanError>`. Replacement columns are fully computed before
//! being swapped in, so a failed call leaves the table exactly as it was.
//!
//! Every operation preserves row count and row order; nothing here filters
//! or sorts.

pub mod annotate;
pub mod mapping;
pub mod names;
pub mod numeric;
pub mod synthetic;
pub mod text;

pub use annotate::set_constant_column;
pub use mapping::{
    approval_status, education_flags, gender_flags, label_mapping, map_binary_labels,
    yes_no_flags, Label, LabelMapping,
};
pub use names::{normalize_column_names, rename_columns_positional};
pub use numeric::{cast_columns_to_float, scale_column, MONTHS_PER_YEAR};
pub use synthetic::generate_synthetic_columns;
pub use text::{strip_character, strip_whitespace_all, truncate_column_suffix};

use crate::error::CleanError;
use polars::prelude::*;

/// Look up a column, mapping the polars miss onto our structured error.
pub(crate) fn checked_column<'a>(
    df: &'a DataFrame,
    name: &str,
) -> Result<&'a Column, CleanError> {
    df.column(name).map_err(|_| CleanError::ColumnNotFound {
        column: name.to_string(),
    })
}

/// Render one cell for error messages, without surrounding quotes.
pub(crate) fn cell_to_string(series: &Series, idx: usize) -> String {
    series
        .get(idx)
        .map(|av| av.str_value().into_owned())
        .unwrap_or_else(|_| String::from("<unreadable>"))
}
