//! Synthetic column generation by empirical resampling.
//!
//! Sampling uniformly with replacement over a reference column's observed
//! rows *is* drawing from the maximum-likelihood categorical estimate of
//! that column: each distinct value is picked with probability equal to its
//! observed relative frequency. Draws are independent across rows and
//! across columns; no joint distribution is preserved.

use polars::prelude::*;
use rand::Rng;

use super::checked_column;
use crate::error::CleanError;

/// Populate (or overwrite) each column in `cols` on `df` with
/// `df.height()` independent draws from the empirical distribution of the
/// same-named column in `reference`.
///
/// The sampled column keeps the reference column's dtype. Nulls in the
/// reference are excluded from the distribution; a reference column with
/// zero non-null observations fails with [`CleanError::EmptyDistribution`].
///
/// Deterministic given a seeded RNG (`StdRng::seed_from_u64`), which is how
/// the tests pin outcomes.
pub fn generate_synthetic_columns<R: Rng>(
    df: &mut DataFrame,
    reference: &DataFrame,
    cols: &[&str],
    rng: &mut R,
) -> Result<(), CleanError> {
    let height = df.height();

    // Sample everything before touching `df`, so a failure on the second
    // column cannot leave the first one half-applied.
    let mut sampled = Vec::with_capacity(cols.len());
    for &col in cols {
        let observed = checked_column(reference, col)?
            .as_materialized_series()
            .drop_nulls();

        if observed.is_empty() {
            return Err(CleanError::EmptyDistribution {
                column: col.to_string(),
            });
        }

        let indices: Vec<IdxSize> = (0..height)
            .map(|_| rng.gen_range(0..observed.len()) as IdxSize)
            .collect();
        let idx = IdxCa::from_vec("idx".into(), indices);
        sampled.push(observed.take(&idx)?.with_name(col.into()));
    }

    for series in sampled {
        df.with_column(series)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampled_values_come_from_reference() {
        let reference = df!("education" => &["Graduate", "Not Graduate"]).unwrap();
        let mut df = df!("id" => &[1, 2, 3, 4, 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        generate_synthetic_columns(&mut df, &reference, &["education"], &mut rng).unwrap();

        assert_eq!(df.height(), 5);
        let values = df
            .column("education")
            .unwrap()
            .as_materialized_series()
            .clone();
        for i in 0..values.len() {
            let v = values.get(i).unwrap().str_value().into_owned();
            assert!(v == "Graduate" || v == "Not Graduate", "unexpected {v}");
        }
    }

    #[test]
    fn sampled_column_keeps_reference_dtype() {
        let reference = df!("dependents" => &[0i64, 1, 2, 3]).unwrap();
        let mut df = df!("id" => &[1, 2, 3]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        generate_synthetic_columns(&mut df, &reference, &["dependents"], &mut rng).unwrap();

        assert_eq!(df.column("dependents").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn deterministic_under_fixed_seed() {
        let reference = df!("v" => &["A", "B", "C"]).unwrap();

        let mut first = df!("id" => &[1, 2, 3, 4]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        generate_synthetic_columns(&mut first, &reference, &["v"], &mut rng).unwrap();

        let mut second = df!("id" => &[1, 2, 3, 4]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        generate_synthetic_columns(&mut second, &reference, &["v"], &mut rng).unwrap();

        assert!(first.equals(&second));
    }

    #[test]
    fn missing_reference_column_fails_before_mutation() {
        let reference = df!("a" => &["x"]).unwrap();
        let mut df = df!("id" => &[1, 2]).unwrap();
        let before = df.clone();
        let mut rng = StdRng::seed_from_u64(1);

        let err =
            generate_synthetic_columns(&mut df, &reference, &["a", "b"], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CleanError::ColumnNotFound { ref column } if column == "b"
        ));
        assert!(df.equals(&before));
    }

    #[test]
    fn all_null_reference_is_empty_distribution() {
        let reference = df!("v" => &[None::<&str>, None, None]).unwrap();
        let mut df = df!("id" => &[1, 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let err = generate_synthetic_columns(&mut df, &reference, &["v"], &mut rng).unwrap_err();
        assert!(matches!(
            err,
            CleanError::EmptyDistribution { ref column } if column == "v"
        ));
    }
}
