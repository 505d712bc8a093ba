//! Numeric cleanups: scaling and float casting.

use polars::prelude::*;

use super::{cell_to_string, checked_column};
use crate::error::CleanError;

/// The scale factor the loan notebooks apply to monthly income columns.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Multiply every value in `col` by `factor`.
///
/// Integer columns scaled by a whole-number factor stay integers; any other
/// combination produces `Float64`, and integer products that would overflow
/// `i64` fall back to the float path instead of wrapping. String columns are
/// coerced first and fail with [`CleanError::TypeCoercion`] on the first
/// unparseable value.
pub fn scale_column(df: &mut DataFrame, col: &str, factor: f64) -> Result<(), CleanError> {
    let series = checked_column(df, col)?.as_materialized_series().clone();

    let integer_scaled = if series.dtype().is_integer() && factor.fract() == 0.0 {
        scale_integers_checked(&series, factor as i64)?
    } else {
        None
    };

    let scaled = match integer_scaled {
        Some(ints) => ints,
        None => {
            let floats = coerce_to_float(&series, col)?;
            floats.f64()?.apply_values(|v| v * factor).into_series()
        }
    };

    df.replace(col, scaled.with_name(col.into()))?;
    Ok(())
}

/// Multiply an integer column by an integer factor. Returns `None` when any
/// product overflows `i64`, letting the caller retry in floats.
fn scale_integers_checked(series: &Series, factor: i64) -> Result<Option<Series>, CleanError> {
    let ints = series.cast(&DataType::Int64)?;
    let ca = ints.i64()?;

    let mut out: Vec<Option<i64>> = Vec::with_capacity(ca.len());
    for opt in ca {
        match opt {
            Some(v) => match v.checked_mul(factor) {
                Some(product) => out.push(Some(product)),
                None => return Ok(None),
            },
            None => out.push(None),
        }
    }
    Ok(Some(Series::new(series.name().clone(), out)))
}

/// Cast each named column to `Float64`.
///
/// Fails with [`CleanError::TypeCoercion`] naming the first value that does
/// not parse; no column is modified unless all of them cast cleanly.
pub fn cast_columns_to_float(df: &mut DataFrame, cols: &[&str]) -> Result<(), CleanError> {
    let mut casted = Vec::with_capacity(cols.len());
    for &col in cols {
        let series = checked_column(df, col)?.as_materialized_series().clone();
        casted.push(coerce_to_float(&series, col)?);
    }

    for (&col, series) in cols.iter().zip(casted) {
        df.replace(col, series.with_name(col.into()))?;
    }
    Ok(())
}

/// Non-strict cast to `Float64`, upgraded to a structured error when the
/// cast silently nulls out a value it could not parse.
fn coerce_to_float(series: &Series, col: &str) -> Result<Series, CleanError> {
    let floats = series.cast(&DataType::Float64)?;

    if floats.null_count() > series.null_count() {
        for i in 0..series.len() {
            let was_null = matches!(series.get(i), Ok(AnyValue::Null));
            let now_null = matches!(floats.get(i), Ok(AnyValue::Null));
            if now_null && !was_null {
                return Err(CleanError::TypeCoercion {
                    column: col.to_string(),
                    value: cell_to_string(series, i),
                });
            }
        }
    }

    Ok(floats)
}
