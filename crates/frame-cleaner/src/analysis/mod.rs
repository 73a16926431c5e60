//! Read-only dataset analysis.
//!
//! Summaries shown alongside a cleaned table: missing-value counts, column
//! types, descriptive statistics for numeric columns, unique counts for the
//! rest, and pairwise correlations.

mod statistics;

use crate::error::Result;
use crate::utils::{dtype_category_str, is_numeric_dtype, series_dtype_category};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statistics::{aligned_values, mean, numeric_values, pearson, quantile_sorted, sample_std};
use tracing::debug;

/// Missing cells in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueCount {
    pub column: String,
    pub missing: usize,
    /// Share of rows that are missing, 0-100.
    pub percentage: f64,
}

/// Missing-value count per column, in column order.
pub fn missing_values(df: &DataFrame) -> Vec<MissingValueCount> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let missing = col.null_count();
            let percentage = if height == 0 {
                0.0
            } else {
                missing as f64 / height as f64 * 100.0
            };
            MissingValueCount {
                column: col.name().to_string(),
                missing,
                percentage,
            }
        })
        .collect()
}

/// Dtype of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnType {
    pub column: String,
    /// Polars dtype name, e.g. `i64`, `str`, `date`.
    pub dtype: String,
    /// Coarse category: numeric, datetime, boolean, string or other.
    pub category: String,
}

/// Descriptive statistics of a numeric column.
///
/// Every statistic is `None` when the column has no values; `std` also needs
/// at least two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericSummary {
    fn from_series(series: &Series) -> Result<Self> {
        let mut values = numeric_values(series)?;
        values.sort_by(|a, b| a.total_cmp(b));

        Ok(Self {
            column: series.name().to_string(),
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
            min: values.first().copied(),
            q25: quantile_sorted(&values, 0.25),
            median: quantile_sorted(&values, 0.5),
            q75: quantile_sorted(&values, 0.75),
            max: values.last().copied(),
        })
    }
}

/// Distinct non-null values in a non-numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueCount {
    pub column: String,
    pub unique: usize,
}

/// Pearson correlations between numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major; `values[i][j]` pairs `columns[i]` with `columns[j]`.
    /// `None` where the correlation is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    fn from_columns(columns: &[&Series]) -> Result<Self> {
        let aligned = columns
            .iter()
            .map(|s| aligned_values(s))
            .collect::<PolarsResult<Vec<_>>>()?;

        let n = aligned.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&aligned[i], &aligned[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            columns: columns.iter().map(|s| s.name().to_string()).collect(),
            values,
        })
    }

    /// Correlation between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Full analysis of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub rows: usize,
    pub columns: usize,
    pub column_types: Vec<ColumnType>,
    pub missing_values: Vec<MissingValueCount>,
    pub numeric_summaries: Vec<NumericSummary>,
    pub unique_counts: Vec<UniqueCount>,
    /// Present only with at least two numeric columns.
    pub correlations: Option<CorrelationMatrix>,
}

impl DatasetAnalysis {
    /// Analyze `df` without modifying it.
    pub fn analyze(df: &DataFrame) -> Result<Self> {
        let mut column_types = Vec::with_capacity(df.width());
        let mut numeric_summaries = Vec::new();
        let mut unique_counts = Vec::new();
        let mut numeric_columns = Vec::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            column_types.push(ColumnType {
                column: series.name().to_string(),
                dtype: series.dtype().to_string(),
                category: dtype_category_str(series_dtype_category(series)).to_string(),
            });

            if is_numeric_dtype(series.dtype()) {
                numeric_summaries.push(NumericSummary::from_series(series)?);
                numeric_columns.push(series);
            } else {
                unique_counts.push(UniqueCount {
                    column: series.name().to_string(),
                    unique: series.drop_nulls().n_unique()?,
                });
            }
        }

        let correlations = if numeric_columns.len() > 1 {
            Some(CorrelationMatrix::from_columns(&numeric_columns)?)
        } else {
            debug!("Fewer than two numeric columns, no correlation matrix");
            None
        };

        Ok(Self {
            rows: df.height(),
            columns: df.width(),
            column_types,
            missing_values: missing_values(df),
            numeric_summaries,
            unique_counts,
            correlations,
        })
    }

    /// Summary of a numeric column by name.
    pub fn numeric_summary(&self, column: &str) -> Option<&NumericSummary> {
        self.numeric_summaries.iter().find(|s| s.column == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_df() -> DataFrame {
        df![
            "age" => [Some(20i64), Some(30), None, Some(40)],
            "income" => [Some(1000.0), Some(2000.0), Some(2500.0), Some(3000.0)],
            "city" => [Some("Oslo"), Some("Rome"), Some("Oslo"), None],
        ]
        .unwrap()
    }

    #[test]
    fn test_missing_values() {
        let counts = missing_values(&sample_df());

        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].column, "age");
        assert_eq!(counts[0].missing, 1);
        assert_eq!(counts[0].percentage, 25.0);
        assert_eq!(counts[1].missing, 0);
    }

    #[test]
    fn test_missing_values_empty_frame() {
        let df = df!["a" => Vec::<i64>::new()].unwrap();
        assert_eq!(missing_values(&df)[0].percentage, 0.0);
    }

    #[test]
    fn test_column_types() {
        let analysis = DatasetAnalysis::analyze(&sample_df()).unwrap();
        let categories: Vec<&str> = analysis
            .column_types
            .iter()
            .map(|t| t.category.as_str())
            .collect();

        assert_eq!((analysis.rows, analysis.columns), (4, 3));
        assert_eq!(categories, vec!["numeric", "numeric", "string"]);
    }

    #[test]
    fn test_numeric_summary() {
        let analysis = DatasetAnalysis::analyze(&sample_df()).unwrap();
        let age = analysis.numeric_summary("age").unwrap();

        assert_eq!(age.count, 3);
        assert_eq!(age.mean, Some(30.0));
        assert_eq!(age.std, Some(10.0));
        assert_eq!(age.min, Some(20.0));
        assert_eq!(age.q25, Some(25.0));
        assert_eq!(age.median, Some(30.0));
        assert_eq!(age.q75, Some(35.0));
        assert_eq!(age.max, Some(40.0));
    }

    #[test]
    fn test_unique_counts_skip_nulls() {
        let analysis = DatasetAnalysis::analyze(&sample_df()).unwrap();
        assert_eq!(
            analysis.unique_counts,
            vec![UniqueCount {
                column: "city".to_string(),
                unique: 2,
            }]
        );
    }

    #[test]
    fn test_correlation_matrix() {
        let analysis = DatasetAnalysis::analyze(&sample_df()).unwrap();
        let corr = analysis.correlations.unwrap();

        assert_eq!(corr.columns, vec!["age", "income"]);
        assert!((corr.get("age", "income").unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(corr.get("age", "income"), corr.get("income", "age"));
        assert!((corr.get("age", "age").unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(corr.get("age", "city"), None);
    }

    #[test]
    fn test_no_correlation_with_single_numeric_column() {
        let df = df![
            "n" => [1i32, 2, 3],
            "s" => ["a", "b", "c"],
        ]
        .unwrap();

        let analysis = DatasetAnalysis::analyze(&df).unwrap();
        assert!(analysis.correlations.is_none());
    }

    #[test]
    fn test_all_null_numeric_column() {
        let df = df![
            "n" => [Option::<f64>::None, None],
        ]
        .unwrap();

        let summary = &DatasetAnalysis::analyze(&df).unwrap().numeric_summaries[0];
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.q25, None);
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = DatasetAnalysis::analyze(&sample_df()).unwrap();
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["rows"], 4);
        assert_eq!(json["numeric_summaries"][0]["column"], "age");
        assert!(json["correlations"]["values"].is_array());
    }
}
