//! Finite-mapping substitution for categorical columns.
//!
//! One parametrized operation covers the whole family of "turn this label
//! into that one" cleanups: Y/N approval status, Yes/No flags, gender and
//! education indicators. The mapping is a plain value, so callers bring
//! their own.

use std::collections::BTreeMap;

use polars::prelude::*;

use super::checked_column;
use crate::error::CleanError;

/// A replacement target: either another label or an integer flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Str(String),
    Int(i64),
}

impl From<&str> for Label {
    fn from(v: &str) -> Self {
        Label::Str(v.to_string())
    }
}

impl From<i64> for Label {
    fn from(v: i64) -> Self {
        Label::Int(v)
    }
}

/// Exact-match substitution table, keyed on the cell's text form.
pub type LabelMapping = BTreeMap<String, Label>;

/// Build a [`LabelMapping`] from `(key, target)` pairs.
pub fn label_mapping<L: Into<Label>>(
    pairs: impl IntoIterator<Item = (&'static str, L)>,
) -> LabelMapping {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into()))
        .collect()
}

/// `Y` → `Approved`, `N` → `Rejected`.
pub fn approval_status() -> LabelMapping {
    label_mapping([("Y", "Approved"), ("N", "Rejected")])
}

/// `Yes` → `1`, `No` → `0`.
pub fn yes_no_flags() -> LabelMapping {
    label_mapping([("Yes", 1i64), ("No", 0)])
}

/// `Female` → `1`, `Male` → `0`.
pub fn gender_flags() -> LabelMapping {
    label_mapping([("Female", 1i64), ("Male", 0)])
}

/// `Graduate` → `1`, `Not Graduate` → `0`.
pub fn education_flags() -> LabelMapping {
    label_mapping([("Graduate", 1i64), ("Not Graduate", 0)])
}

/// Replace exact-match values in `col` according to `mapping`.
///
/// Values absent from the mapping's key set pass through unchanged; nulls
/// stay null. The output column is `Int64` when every mapping target is an
/// integer and every non-null input value is a mapping key; otherwise it is
/// `String`, with integer targets rendered as text.
///
/// Re-applying a mapping whose targets do not collide with its keys is a
/// no-op (the first pass leaves nothing left to match).
pub fn map_binary_labels(
    df: &mut DataFrame,
    col: &str,
    mapping: &LabelMapping,
) -> Result<(), CleanError> {
    let series = checked_column(df, col)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    let ca = series.str()?;

    // A pass that matches nothing must leave the column alone, dtype
    // included. Without this, re-applying an integer-target mapping would
    // stringify the Int64 column produced by the first pass.
    let any_match = ca
        .into_iter()
        .any(|opt| opt.is_some_and(|v| mapping.contains_key(v)));
    if !any_match {
        return Ok(());
    }

    let all_int_targets = mapping.values().all(|l| matches!(l, Label::Int(_)));
    let fully_covered = ca
        .into_iter()
        .all(|opt| opt.map_or(true, |v| mapping.contains_key(v)));

    let replaced = if all_int_targets && fully_covered {
        let values: Vec<Option<i64>> = ca
            .into_iter()
            .map(|opt| {
                opt.map(|v| match mapping.get(v) {
                    Some(Label::Int(i)) => *i,
                    // fully_covered && all_int_targets guarantee this arm
                    _ => unreachable!("uncovered value after coverage check"),
                })
            })
            .collect();
        Series::new(col.into(), values)
    } else {
        let values: Vec<Option<String>> = ca
            .into_iter()
            .map(|opt| {
                opt.map(|v| match mapping.get(v) {
                    Some(Label::Str(s)) => s.clone(),
                    Some(Label::Int(i)) => i.to_string(),
                    None => v.to_string(),
                })
            })
            .collect();
        Series::new(col.into(), values)
    };

    df.replace(col, replaced)?;
    Ok(())
}
