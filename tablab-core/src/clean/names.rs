//! Column-name operations: normalization and positional rename.

use std::collections::BTreeSet;

use polars::prelude::*;

use crate::error::CleanError;

/// Normalize every column name: trim surrounding whitespace, lowercase, and
/// replace internal spaces with underscores.
///
/// Idempotent: the normalized form is a fixed point. Fails with
/// [`CleanError::DuplicateColumnName`] when two headers collapse onto the
/// same normalized name (e.g. `"Income"` and `" income "`), leaving the
/// table unmodified.
pub fn normalize_column_names(df: &mut DataFrame) -> Result<(), CleanError> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_lowercase().replace(' ', "_"))
        .collect();

    let mut seen = BTreeSet::new();
    for name in &normalized {
        if !seen.insert(name.as_str()) {
            return Err(CleanError::DuplicateColumnName { name: name.clone() });
        }
    }

    df.set_column_names(normalized)?;
    Ok(())
}

/// Replace all column names, in positional order, with `new_names`.
///
/// This is a blunt, schema-coupled rename with no name-based matching: the
/// caller guarantees positional alignment (see
/// [`crate::schema::LOAN_APPLICATION_COLUMNS`] for the canonical use).
/// Fails with [`CleanError::ShapeMismatch`] when the name count differs from
/// the column count.
pub fn rename_columns_positional(
    df: &mut DataFrame,
    new_names: &[&str],
) -> Result<(), CleanError> {
    if new_names.len() != df.width() {
        return Err(CleanError::ShapeMismatch {
            expected: df.width(),
            actual: new_names.len(),
        });
    }

    df.set_column_names(new_names.iter().copied())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_lowercases_and_underscores() {
        let mut df = df!(
            " Self_Employed " => &["Yes", "No"],
            "Loan Amount" => &[100, 200],
        )
        .unwrap();

        normalize_column_names(&mut df).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["self_employed", "loan_amount"]);
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut df = df!("Loan Amount" => &[1, 2], " Term" => &[3, 4]).unwrap();

        normalize_column_names(&mut df).unwrap();
        let first: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        normalize_column_names(&mut df).unwrap();
        let second: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn normalize_rejects_colliding_names() {
        let mut df = df!("Income" => &[1], " income " => &[2]).unwrap();

        let err = normalize_column_names(&mut df).unwrap_err();
        assert!(matches!(
            err,
            CleanError::DuplicateColumnName { ref name } if name == "income"
        ));

        // Table untouched on failure.
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Income", " income "]);
    }

    #[test]
    fn positional_rename_replaces_all_names() {
        let mut df = df!("a" => &[1], "b" => &[2], "c" => &[3]).unwrap();

        rename_columns_positional(&mut df, &["x", "y", "z"]).unwrap();

        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn positional_rename_rejects_wrong_count() {
        let mut df = df!("a" => &[1], "b" => &[2]).unwrap();

        let err = rename_columns_positional(&mut df, &["x"]).unwrap_err();
        assert!(matches!(
            err,
            CleanError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }
}
