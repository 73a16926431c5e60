//! Column classification by current representation.

use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Imputation bucket of a column.
///
/// Decided from the dtype alone; values are never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    /// Any integer or floating point dtype.
    Numeric,
    /// Text, temporal, boolean and everything else.
    NonNumeric,
}

impl ColumnClass {
    /// Classify a dtype.
    pub fn of(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            ColumnClass::Numeric
        } else {
            ColumnClass::NonNumeric
        }
    }

    /// Classify a Series by its dtype.
    pub fn of_series(series: &Series) -> Self {
        Self::of(series.dtype())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dtypes() {
        for dtype in [
            DataType::Int8,
            DataType::Int64,
            DataType::UInt32,
            DataType::Float32,
            DataType::Float64,
        ] {
            assert_eq!(ColumnClass::of(&dtype), ColumnClass::Numeric, "{:?}", dtype);
        }
    }

    #[test]
    fn test_non_numeric_dtypes() {
        for dtype in [
            DataType::String,
            DataType::Boolean,
            DataType::Date,
            DataType::Datetime(TimeUnit::Nanoseconds, None),
            DataType::Null,
        ] {
            assert_eq!(
                ColumnClass::of(&dtype),
                ColumnClass::NonNumeric,
                "{:?}",
                dtype
            );
        }
    }

    #[test]
    fn test_numeric_strings_are_not_numeric() {
        // Classification looks at the dtype, not at what the text says.
        let series = Series::new("n".into(), &["1", "2", "3"]);
        assert_eq!(ColumnClass::of_series(&series), ColumnClass::NonNumeric);
    }
}
