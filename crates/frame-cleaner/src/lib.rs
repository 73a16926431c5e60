//! Tabular Data Cleaning Library
//!
//! A small, deterministic cleaning engine for in-memory tables, built on Polars.
//!
//! # Overview
//!
//! Given a [`DataFrame`](polars::prelude::DataFrame), the engine returns a new
//! frame in which:
//!
//! - **Missing values** are filled: numeric columns with the mean of their
//!   non-null values, every other column with its most frequent value
//! - **Duplicate rows** are removed, keeping the first occurrence in order
//! - **String columns** are re-typed as integer, float, date or datetime when
//!   every value fits, and left alone otherwise
//!
//! The input frame is never modified. Every decision is recorded in a
//! [`CleaningReport`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use frame_cleaner::{clean, DataCleaner, CleanerConfig};
//! use frame_cleaner::loader::load_dataset;
//!
//! let df = load_dataset("data.csv")?;
//!
//! // Option 1: all stages, default settings
//! let cleaned = clean(&df)?;
//!
//! // Option 2: choose stages and keep the report
//! let config = CleanerConfig::builder()
//!     .remove_duplicates(false)
//!     .max_report_values(3)
//!     .build()?;
//!
//! let (cleaned, report) = DataCleaner::new(config).clean_with_report(&df)?;
//! for line in report.action_lines() {
//!     println!("{}", line);
//! }
//! ```
//!
//! # Analysis
//!
//! [`DatasetAnalysis`] summarizes a table (types, missing values, descriptive
//! statistics, correlations) without changing it:
//!
//! ```rust,ignore
//! use frame_cleaner::DatasetAnalysis;
//!
//! let analysis = DatasetAnalysis::analyze(&cleaned)?;
//! println!("{}", serde_json::to_string_pretty(&analysis)?);
//! ```

pub mod analysis;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod loader;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analysis::{
    ColumnType, CorrelationMatrix, DatasetAnalysis, MissingValueCount, NumericSummary,
    UniqueCount, missing_values,
};
pub use cleaner::{Coercion, ColumnClass, DataCleaner, TypeCorrector, clean, remove_duplicates};
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use loader::{DatasetFormat, load_dataset, save_dataset};
pub use types::{
    CleaningReport, CoercionOutcome, CoercionRecord, FillValue, ImputationRecord, SkipReason,
};
pub use utils::{
    DtypeCategory, dtype_category_str, get_dtype_category, is_boolean_dtype, is_datetime_dtype,
    is_numeric_dtype,
};
