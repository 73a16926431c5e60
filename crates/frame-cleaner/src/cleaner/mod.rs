//! Data cleaning module for preprocessing datasets.
//!
//! This module provides functionality for:
//! - Filling missing values (mean for numeric columns, mode otherwise)
//! - Removing exact duplicate rows
//! - Type correction of string columns
//!
//! Stages run in that fixed order on a private copy of the input. Duplicate
//! removal runs again after coercion when a column was converted.

mod classifier;
mod converters;
mod type_corrector;

pub use classifier::ColumnClass;
pub use converters::Coercion;
pub use type_corrector::TypeCorrector;

use crate::config::CleanerConfig;
use crate::error::{Result, ResultExt};
use crate::imputers::StatisticalImputer;
use crate::types::CleaningReport;
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Data cleaner for automatic dataset cleaning operations.
#[derive(Debug, Clone, Default)]
pub struct DataCleaner {
    config: CleanerConfig,
}

static_assertions::assert_impl_all!(DataCleaner: Send, Sync);

impl DataCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// Clean a table and return the result.
    ///
    /// See [`DataCleaner::clean_with_report`].
    pub fn clean(&self, df: &DataFrame) -> Result<DataFrame> {
        self.clean_with_report(df).map(|(df, _)| df)
    }

    /// Clean a table and describe what was done.
    ///
    /// Stages:
    /// 1. Impute missing values
    /// 2. Remove duplicate rows, keeping the first occurrence
    /// 3. Coerce string columns to numeric or temporal types
    ///
    /// Coercion can make distinct text rows equal (`"1"` and `"1.0"`), so
    /// duplicates are removed a second time if any column was converted.
    ///
    /// `df` is never modified. An empty table comes back as an equal empty
    /// table.
    pub fn clean_with_report(&self, df: &DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let start = Instant::now();
        let mut report = CleaningReport {
            rows_before: df.height(),
            columns: df.width(),
            ..Default::default()
        };

        info!(
            "Cleaning table: {} rows x {} columns",
            df.height(),
            df.width()
        );

        if df.width() == 0 {
            debug!("Table has no columns, nothing to clean");
            report.rows_after = df.height();
            return Ok((df.clone(), report));
        }

        let mut out = df.clone();

        // 1. Impute missing values
        if self.config.impute_missing {
            let (imputed, records) =
                StatisticalImputer::impute_frame(&out).context("Imputation failed")?;
            out = imputed;
            info!(
                "Imputation: {} column(s) had missing values",
                records.len()
            );
            report.imputations = records;
        }

        // 2. Remove duplicate rows
        if self.config.remove_duplicates {
            let (deduped, removed) = remove_duplicates(&out)?;
            out = deduped;
            report.duplicates_removed = removed;
            if removed > 0 {
                info!("Removed {} duplicate rows", removed);
            } else {
                debug!("No duplicate rows found");
            }
        }

        // 3. Coerce string columns
        if self.config.coerce_types {
            let corrector = TypeCorrector::new(self.config.max_report_values);
            let (coerced, records) = corrector
                .correct_column_types(&out)
                .context("Type coercion failed")?;
            out = coerced;
            report.coercions = records;

            let converted = report.converted_columns().len();
            info!("Type coercion: {} column(s) converted", converted);

            if self.config.remove_duplicates && converted > 0 {
                let (deduped, removed) = remove_duplicates(&out)?;
                out = deduped;
                report.duplicates_removed += removed;
                if removed > 0 {
                    info!("Removed {} rows made duplicate by coercion", removed);
                }
            }
        }

        report.rows_after = out.height();
        report.duration_ms = start.elapsed().as_millis() as u64;

        Ok((out, report))
    }
}

/// Clean a table with the default configuration.
pub fn clean(df: &DataFrame) -> Result<DataFrame> {
    DataCleaner::default().clean(df)
}

/// Drop rows that exactly repeat an earlier row.
///
/// Two rows are duplicates when every column is equal, with null equal to
/// null. The first occurrence survives and row order is preserved. Returns
/// the deduplicated table and the number of rows removed.
pub fn remove_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
    if df.width() == 0 || df.height() < 2 {
        return Ok((df.clone(), 0));
    }

    let deduped = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()
        .context("Duplicate removal failed")?;

    let removed = df.height() - deduped.height();
    Ok((deduped, removed))
}
