//! Shared utilities for the cleaning engine.
//!
//! Dtype classification helpers and small Series routines used by more than
//! one stage.

use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Representation tag of a column, derived from its Polars dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date, datetime or time types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/categorical text
    String,
    /// Anything else (lists, structs, binary, ...)
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a temporal type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Check if a DataType is boolean.
#[inline]
pub fn is_boolean_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Boolean)
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if is_boolean_dtype(dtype) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Get the dtype category of a Series.
pub fn series_dtype_category(series: &Series) -> DtypeCategory {
    get_dtype_category(series.dtype())
}

/// Lowercase label for a category, as shown in reports.
pub fn dtype_category_str(category: DtypeCategory) -> &'static str {
    match category {
        DtypeCategory::Numeric => "numeric",
        DtypeCategory::Datetime => "datetime",
        DtypeCategory::Boolean => "boolean",
        DtypeCategory::String => "string",
        DtypeCategory::Other => "other",
    }
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Row index of the first occurrence of the most frequent non-null value.
///
/// Ties resolve to the value that appears first in the column. Values are
/// keyed by their string rendering, which is injective within one dtype.
/// Returns `Ok(None)` for an all-null Series and `Err` when the dtype has no
/// string rendering (nested types).
pub fn mode_index(series: &Series) -> PolarsResult<Option<usize>> {
    let keys = series.cast(&DataType::String)?;
    let keys = keys.str()?;

    // value -> (occurrences, first row)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, val) in keys.into_iter().enumerate() {
        if let Some(v) = val {
            counts
                .entry(v)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, idx));
        }
    }

    Ok(counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)))
        .map(|(_, first_idx)| first_idx))
}

/// Fill null values in a numeric Series with a specific value.
///
/// Integer columns become `Float64`; `Float32` and `Float64` columns keep
/// their dtype.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let result: Vec<Option<f64>> = floats
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    let filled = Series::new(series.name().clone(), result);
    match series.dtype() {
        DataType::Float32 => filled.cast(&DataType::Float32),
        _ => Ok(filled),
    }
}

/// Fill null values in any Series with the value found at `source_idx`.
///
/// The dtype of the Series is preserved.
pub fn fill_nulls_from_index(series: &Series, source_idx: usize) -> PolarsResult<Series> {
    let filler = series.new_from_index(source_idx, series.len());
    series.zip_with(&series.is_not_null(), &filler)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_is_datetime_dtype() {
        assert!(is_datetime_dtype(&DataType::Date));
        assert!(is_datetime_dtype(&DataType::Datetime(
            TimeUnit::Nanoseconds,
            None
        )));
        assert!(!is_datetime_dtype(&DataType::String));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int32), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(
            get_dtype_category(&DataType::Boolean),
            DtypeCategory::Boolean
        );
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
        assert_eq!(
            get_dtype_category(&DataType::List(Box::new(DataType::Int64))),
            DtypeCategory::Other
        );
        assert_eq!(dtype_category_str(DtypeCategory::Boolean), "boolean");
    }

    #[test]
    fn test_mode_index_most_frequent() {
        let series = Series::new("s".into(), &[Some("b"), Some("a"), None, Some("a")]);
        assert_eq!(mode_index(&series).unwrap(), Some(1));
    }

    #[test]
    fn test_mode_index_tie_prefers_first_seen() {
        let series = Series::new("s".into(), &["x", "y", "y", "x"]);
        assert_eq!(mode_index(&series).unwrap(), Some(0));

        let series = Series::new("s".into(), &["q", "p", "r"]);
        assert_eq!(mode_index(&series).unwrap(), Some(0));
    }

    #[test]
    fn test_mode_index_all_null() {
        let series = Series::new("s".into(), &[Option::<&str>::None, None]);
        assert_eq!(mode_index(&series).unwrap(), None);
    }

    #[test]
    fn test_mode_index_boolean() {
        let series = Series::new("b".into(), &[Some(false), Some(true), Some(true), None]);
        assert_eq!(mode_index(&series).unwrap(), Some(1));
    }

    #[test]
    fn test_fill_numeric_nulls() {
        let series = Series::new("test".into(), &[Some(1i64), None, Some(3)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float64);
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
        assert_eq!(filled.get(2).unwrap().try_extract::<f64>().unwrap(), 3.0);
    }

    #[test]
    fn test_fill_numeric_nulls_keeps_float32() {
        let series = Series::new("test".into(), &[Some(1.5f32), None, Some(2.5)]);
        let filled = fill_numeric_nulls(&series, 2.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float32);
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap(), AnyValue::Float32(2.0));
    }

    #[test]
    fn test_fill_nulls_from_index_keeps_dtype() {
        let series = Series::new("flag".into(), &[Some(true), None, Some(false)]);
        let filled = fill_nulls_from_index(&series, 0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Boolean);
        assert_eq!(filled.null_count(), 0);
        assert_eq!(filled.get(1).unwrap(), AnyValue::Boolean(true));
        assert_eq!(filled.get(2).unwrap(), AnyValue::Boolean(false));
    }
}
