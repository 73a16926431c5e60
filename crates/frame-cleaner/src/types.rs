use crate::cleaner::ColumnClass;
use serde::{Deserialize, Serialize};

/// Why a coercion attempt left a column in its prior representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Only string columns are candidates for coercion.
    NotTextual { dtype: String },
    /// The column has no non-null values to judge by.
    NoValues,
    /// At least one value did not parse. `first_row` is the first offender;
    /// `samples` holds up to `max_report_values` offending values.
    Unparseable {
        target: String,
        first_row: usize,
        failed: usize,
        samples: Vec<String>,
    },
    /// The first value matched none of the known date/time layouts.
    NoTemporalFormat { sample: String },
    /// The values carry a UTC offset; a timezone-aware column is not a
    /// plain temporal column and stays textual.
    TimezoneAware { sample: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotTextual { dtype } => write!(f, "not a string column ({})", dtype),
            Self::NoValues => write!(f, "no non-null values"),
            Self::Unparseable {
                target,
                first_row,
                failed,
                samples,
            } => write!(
                f,
                "{} value(s) not parseable as {} (first at row {}: {:?})",
                failed, target, first_row, samples
            ),
            Self::NoTemporalFormat { sample } => {
                write!(f, "no date/time layout matches '{}'", sample)
            }
            Self::TimezoneAware { sample } => {
                write!(f, "timezone-aware value '{}'", sample)
            }
        }
    }
}

/// Final outcome of the coercion stage for one string column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoercionOutcome {
    /// Column re-typed; `dtype` is the new Polars dtype.
    Converted { dtype: String },
    /// Column kept as text. One reason per attempted representation, in
    /// attempt order (numeric first, temporal second).
    Kept { reasons: Vec<SkipReason> },
}

/// Coercion record for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoercionRecord {
    pub column: String,
    #[serde(flatten)]
    pub outcome: CoercionOutcome,
}

/// Value used to fill a column's missing cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum FillValue {
    Mean(f64),
    Mode(String),
}

/// Imputation record for one column that had missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationRecord {
    pub column: String,
    pub class: ColumnClass,
    /// Number of null cells before imputation.
    pub missing: usize,
    /// `None` when no fill value exists (all-null column or a dtype that
    /// cannot be counted); the column is then left untouched.
    pub fill: Option<FillValue>,
}

impl ImputationRecord {
    /// Whether the column's nulls were replaced.
    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }
}

/// Summary of what one `clean` call did.
///
/// Serialized for the CLI's `--json` output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns: usize,
    pub duplicates_removed: usize,
    pub imputations: Vec<ImputationRecord>,
    pub coercions: Vec<CoercionRecord>,
    pub duration_ms: u64,
}

impl CleaningReport {
    /// Columns the coercion stage re-typed, with their new dtype.
    pub fn converted_columns(&self) -> Vec<(&str, &str)> {
        self.coercions
            .iter()
            .filter_map(|rec| match &rec.outcome {
                CoercionOutcome::Converted { dtype } => Some((rec.column.as_str(), dtype.as_str())),
                CoercionOutcome::Kept { .. } => None,
            })
            .collect()
    }

    /// Total number of cells filled by imputation.
    pub fn cells_imputed(&self) -> usize {
        self.imputations
            .iter()
            .filter(|rec| rec.is_filled())
            .map(|rec| rec.missing)
            .sum()
    }

    /// Human-readable lines, one per action.
    pub fn action_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for rec in &self.imputations {
            match &rec.fill {
                Some(FillValue::Mean(mean)) => lines.push(format!(
                    "Filled {} missing value(s) in '{}' with mean: {:.4}",
                    rec.missing, rec.column, mean
                )),
                Some(FillValue::Mode(mode)) => lines.push(format!(
                    "Filled {} missing value(s) in '{}' with mode: '{}'",
                    rec.missing, rec.column, mode
                )),
                None => lines.push(format!(
                    "Left {} missing value(s) in '{}' (no fill value defined)",
                    rec.missing, rec.column
                )),
            }
        }

        if self.duplicates_removed > 0 {
            lines.push(format!(
                "Removed {} duplicate row(s)",
                self.duplicates_removed
            ));
        } else {
            lines.push("No duplicate rows found".to_string());
        }

        for rec in &self.coercions {
            match &rec.outcome {
                CoercionOutcome::Converted { dtype } => {
                    lines.push(format!("Converted '{}' from String to {}", rec.column, dtype))
                }
                CoercionOutcome::Kept { reasons } => {
                    let why: Vec<String> = reasons.iter().map(|r| r.to_string()).collect();
                    lines.push(format!("Kept '{}' as String: {}", rec.column, why.join("; ")))
                }
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> CleaningReport {
        CleaningReport {
            rows_before: 4,
            rows_after: 3,
            columns: 2,
            duplicates_removed: 1,
            imputations: vec![
                ImputationRecord {
                    column: "age".to_string(),
                    class: ColumnClass::Numeric,
                    missing: 2,
                    fill: Some(FillValue::Mean(30.5)),
                },
                ImputationRecord {
                    column: "empty".to_string(),
                    class: ColumnClass::NonNumeric,
                    missing: 4,
                    fill: None,
                },
            ],
            coercions: vec![
                CoercionRecord {
                    column: "year".to_string(),
                    outcome: CoercionOutcome::Converted {
                        dtype: "i64".to_string(),
                    },
                },
                CoercionRecord {
                    column: "name".to_string(),
                    outcome: CoercionOutcome::Kept {
                        reasons: vec![SkipReason::NoTemporalFormat {
                            sample: "Ann".to_string(),
                        }],
                    },
                },
            ],
            duration_ms: 0,
        }
    }

    #[test]
    fn test_converted_columns() {
        let report = sample_report();
        assert_eq!(report.converted_columns(), vec![("year", "i64")]);
    }

    #[test]
    fn test_cells_imputed_ignores_untouched_columns() {
        assert_eq!(sample_report().cells_imputed(), 2);
    }

    #[test]
    fn test_action_lines() {
        let lines = sample_report().action_lines();
        assert!(lines[0].contains("mean"));
        assert!(lines[1].contains("no fill value"));
        assert!(lines[2].contains("Removed 1 duplicate"));
        assert!(lines[3].contains("Converted 'year'"));
        assert!(lines[4].contains("Ann"));
    }

    #[test]
    fn test_report_serialization_tags() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["imputations"][0]["fill"]["method"], "mean");
        assert_eq!(json["coercions"][0]["status"], "converted");
        assert_eq!(
            json["coercions"][1]["reasons"][0]["reason"],
            "no_temporal_format"
        );
    }
}
