//! Missing-value imputation.
//!
//! The policy is fixed: numeric columns are filled with the mean of their
//! non-null values, all other columns with their mode.

mod statistical;

pub use statistical::StatisticalImputer;
