//! Best-effort re-typing of string columns.

use super::converters::{Coercion, string_to_numeric, string_to_temporal};
use crate::config::DEFAULT_MAX_REPORT_VALUES;
use crate::error::Result;
use crate::types::{CoercionOutcome, CoercionRecord, SkipReason};
use polars::prelude::*;
use tracing::debug;

/// Type corrector for string columns.
///
/// Only `String` columns are examined. Numeric reinterpretation is tried
/// first, temporal second; the first attempt that succeeds for every value
/// wins, otherwise the column stays a string column.
pub struct TypeCorrector {
    max_report_values: usize,
}

impl Default for TypeCorrector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPORT_VALUES)
    }
}

impl TypeCorrector {
    /// Create a corrector that keeps up to `max_report_values` offending
    /// values per skipped attempt.
    pub fn new(max_report_values: usize) -> Self {
        Self { max_report_values }
    }

    /// Coerce every string column of `df`.
    ///
    /// Works on a private copy. Returns one record per string column, in
    /// column order.
    pub fn correct_column_types(&self, df: &DataFrame) -> Result<(DataFrame, Vec<CoercionRecord>)> {
        let mut out = df.clone();
        let mut records = Vec::new();

        debug!("Analyzing string columns for type coercion...");

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if series.dtype() != &DataType::String {
                continue;
            }

            let (converted, record) = self.coerce_series(series)?;
            if let Some(converted) = converted {
                out.replace(series.name().as_str(), converted)?;
            }
            records.push(record);
        }

        Ok((out, records))
    }

    /// Coerce one string column.
    ///
    /// Returns the converted Series, if any, and the record describing the
    /// outcome.
    pub fn coerce_series(&self, series: &Series) -> Result<(Option<Series>, CoercionRecord)> {
        let column = series.name().to_string();

        if series.dtype() != &DataType::String {
            return Ok((
                None,
                CoercionRecord {
                    column,
                    outcome: CoercionOutcome::Kept {
                        reasons: vec![SkipReason::NotTextual {
                            dtype: series.dtype().to_string(),
                        }],
                    },
                },
            ));
        }

        if series.len() == series.null_count() {
            debug!("Skipping '{}': no values to infer a type from", column);
            return Ok((
                None,
                CoercionRecord {
                    column,
                    outcome: CoercionOutcome::Kept {
                        reasons: vec![SkipReason::NoValues],
                    },
                },
            ));
        }

        // Numeric first: a digit-only column such as years is numeric, not temporal.
        let attempts: [fn(&Series, usize) -> Result<Coercion>; 2] =
            [string_to_numeric, string_to_temporal];
        let mut reasons = Vec::new();

        for attempt in attempts {
            match attempt(series, self.max_report_values)? {
                Coercion::Converted(converted) => {
                    let dtype = converted.dtype().to_string();
                    debug!("Converted '{}' from String to {}", column, dtype);
                    return Ok((
                        Some(converted),
                        CoercionRecord {
                            column,
                            outcome: CoercionOutcome::Converted { dtype },
                        },
                    ));
                }
                Coercion::Skipped(reason) => {
                    debug!("'{}': {}", column, reason);
                    reasons.push(reason);
                }
            }
        }

        Ok((
            None,
            CoercionRecord {
                column,
                outcome: CoercionOutcome::Kept { reasons },
            },
        ))
    }
}
