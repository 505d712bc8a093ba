//! CSV loading — how tables enter the cleaning pipeline.

use std::path::Path;

use polars::prelude::*;

/// Read a delimited text file with a header row into a table.
///
/// Column dtypes are inferred; a file whose numeric column carries stray
/// text comes back as `String` and is handled downstream by
/// [`crate::clean::cast_columns_to_float`].
pub fn read_csv(path: &Path) -> PolarsResult<DataFrame> {
    LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()?
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_header_and_rows() {
        let dir = std::env::temp_dir().join(format!("tablab_ingest_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("loans.csv");
        fs::write(&path, "Loan Amount,Loan Status\n100,Y\n250,N\n").unwrap();

        let df = read_csv(&path).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Loan Amount", "Loan Status"]);

        let _ = fs::remove_dir_all(&dir);
    }
}
