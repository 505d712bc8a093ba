//! Canonical column layout for the loan-application dataset.
//!
//! Raw exports of this dataset arrive with inconsistent, vendor-supplied
//! headers, so the cleaning pipeline renames them positionally to this fixed
//! set. The order here must match the column order of the raw file.

/// Target column names for the loan-application dataset, in file order.
pub const LOAN_APPLICATION_COLUMNS: [&str; 8] = [
    "gender",
    "married",
    "dependents",
    "education",
    "self_employed",
    "income",
    "loan_amount",
    "loan_status",
];
