//! Configuration for the cleaning engine.
//!
//! The imputation policy is fixed (mean for numeric columns, mode for
//! everything else). What can be configured is which stages run and how much
//! detail the [`CleaningReport`](crate::types::CleaningReport) keeps.

use serde::{Deserialize, Serialize};

/// Default number of offending values recorded per skipped coercion.
pub const DEFAULT_MAX_REPORT_VALUES: usize = 5;

/// Configuration for [`DataCleaner`](crate::cleaner::DataCleaner).
///
/// Use [`CleanerConfig::builder()`] for a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use frame_cleaner::config::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .remove_duplicates(false)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Fill missing values (mean for numeric, mode otherwise).
    /// Default: true
    pub impute_missing: bool,

    /// Drop rows that exactly repeat an earlier row.
    /// Default: true
    pub remove_duplicates: bool,

    /// Re-type string columns as numeric or temporal when every value fits.
    /// Default: true
    pub coerce_types: bool,

    /// Maximum number of sample values kept in a skip reason.
    /// Default: 5
    pub max_report_values: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            impute_missing: true,
            remove_duplicates: true,
            coerce_types: true,
            max_report_values: DEFAULT_MAX_REPORT_VALUES,
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_report_values == 0 {
            return Err(ConfigValidationError::InvalidMaxReportValues(
                self.max_report_values,
            ));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid max report values: {0} (must be at least 1)")]
    InvalidMaxReportValues(usize),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    impute_missing: Option<bool>,
    remove_duplicates: Option<bool>,
    coerce_types: Option<bool>,
    max_report_values: Option<usize>,
}

impl CleanerConfigBuilder {
    /// Enable or disable missing-value imputation.
    pub fn impute_missing(mut self, enable: bool) -> Self {
        self.impute_missing = Some(enable);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Enable or disable string column coercion.
    pub fn coerce_types(mut self, enable: bool) -> Self {
        self.coerce_types = Some(enable);
        self
    }

    /// Set how many offending values a skipped coercion records.
    pub fn max_report_values(mut self, n: usize) -> Self {
        self.max_report_values = Some(n);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let config = CleanerConfig {
            impute_missing: self.impute_missing.unwrap_or(true),
            remove_duplicates: self.remove_duplicates.unwrap_or(true),
            coerce_types: self.coerce_types.unwrap_or(true),
            max_report_values: self
                .max_report_values
                .unwrap_or(DEFAULT_MAX_REPORT_VALUES),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleanerConfig::default();
        assert!(config.impute_missing);
        assert!(config.remove_duplicates);
        assert!(config.coerce_types);
        assert_eq!(config.max_report_values, DEFAULT_MAX_REPORT_VALUES);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = CleanerConfig::builder().build().unwrap();
        assert_eq!(config, CleanerConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleanerConfig::builder()
            .impute_missing(false)
            .remove_duplicates(false)
            .coerce_types(false)
            .max_report_values(2)
            .build()
            .unwrap();

        assert!(!config.impute_missing);
        assert!(!config.remove_duplicates);
        assert!(!config.coerce_types);
        assert_eq!(config.max_report_values, 2);
    }

    #[test]
    fn test_validation_zero_report_values() {
        let result = CleanerConfig::builder().max_report_values(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidMaxReportValues(0)
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{ "remove_duplicates": false }"#;
        let config: CleanerConfig = serde_json::from_str(json).unwrap();

        assert!(!config.remove_duplicates);
        assert!(config.impute_missing);
        assert!(config.coerce_types);
        assert_eq!(config.max_report_values, DEFAULT_MAX_REPORT_VALUES);
    }
}
