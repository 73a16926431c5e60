//! Mean and mode imputation.

use crate::cleaner::ColumnClass;
use crate::error::Result;
use crate::types::{FillValue, ImputationRecord};
use crate::utils::{fill_nulls_from_index, fill_numeric_nulls, mode_index};
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical imputation for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Impute every column of `df` that has missing values.
    ///
    /// Works on a private copy; `df` is not modified. Returns one record per
    /// column that had at least one null, in column order.
    pub fn impute_frame(df: &DataFrame) -> Result<(DataFrame, Vec<ImputationRecord>)> {
        let mut out = df.clone();
        let mut records = Vec::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if let Some((filled, record)) = Self::impute_series(series)? {
                if let Some(filled) = filled {
                    out.replace(series.name().as_str(), filled)?;
                }
                records.push(record);
            }
        }

        Ok((out, records))
    }

    /// Impute a single column.
    ///
    /// Returns `None` when the column has no nulls. Otherwise returns the
    /// filled Series (or `None` if no fill value exists) with its record.
    pub fn impute_series(series: &Series) -> Result<Option<(Option<Series>, ImputationRecord)>> {
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }

        let class = ColumnClass::of_series(series);
        let (filled, fill) = match class {
            ColumnClass::Numeric => match Self::apply_numeric_mean(series)? {
                Some((filled, mean)) => (Some(filled), Some(FillValue::Mean(mean))),
                None => (None, None),
            },
            ColumnClass::NonNumeric => match Self::apply_mode_imputation(series)? {
                Some((filled, mode)) => (Some(filled), Some(FillValue::Mode(mode))),
                None => (None, None),
            },
        };

        if fill.is_none() {
            debug!(
                "Column '{}': {} missing value(s) left untouched, no fill value",
                series.name(),
                missing
            );
        }

        let record = ImputationRecord {
            column: series.name().to_string(),
            class,
            missing,
            fill,
        };
        Ok(Some((filled, record)))
    }

    /// Fill nulls with the arithmetic mean of the non-null values.
    ///
    /// Returns `None` for an all-null column. Integer columns come back as
    /// `Float64`; float columns keep their dtype.
    pub fn apply_numeric_mean(series: &Series) -> Result<Option<(Series, f64)>> {
        let Some(mean_val) = series.mean() else {
            return Ok(None);
        };

        let filled = fill_numeric_nulls(series, mean_val)?;
        debug!("Filled '{}' with mean: {:.4}", series.name(), mean_val);
        Ok(Some((filled, mean_val)))
    }

    /// Fill nulls with the most frequent non-null value, keeping the dtype.
    ///
    /// Ties go to the value seen first. Returns `None` for an all-null column
    /// or a dtype whose values cannot be counted.
    pub fn apply_mode_imputation(series: &Series) -> Result<Option<(Series, String)>> {
        let idx = match mode_index(series) {
            Ok(Some(idx)) => idx,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(
                    "Column '{}': cannot compute mode for {:?}: {}",
                    series.name(),
                    series.dtype(),
                    e
                );
                return Ok(None);
            }
        };

        let rendered = series.cast(&DataType::String)?;
        let mode_val = rendered.str()?.get(idx).unwrap_or_default().to_string();

        let filled = fill_nulls_from_index(series, idx)?;
        debug!("Filled '{}' with mode: '{}'", series.name(), mode_val);
        Ok(Some((filled, mode_val)))
    }
}
