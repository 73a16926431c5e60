//! Error types for the cleaning engine and its loaders.
//!
//! The engine itself recovers locally from every data-level problem (an
//! unparseable cell, an all-missing column). Errors surface only for I/O,
//! invalid configuration, or an underlying Polars kernel failure.
//!
//! Errors serialize to `{ "code": ..., "message": ... }` so a frontend can
//! branch on the code without parsing the message.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning engine.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The file extension is not one the loader understands.
    #[error("Unsupported file type '{0}': expected .csv or .json")]
    UnsupportedFormat(String),

    /// The dataset could not be read into a table.
    #[error("Failed to load dataset '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::LoadFailed { .. } => "LOAD_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the caller can fix the problem and retry (bad input or config).
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidConfig(_) | Self::UnsupportedFormat(_) | Self::LoadFailed { .. } => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for CleaningError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        CleaningError::InvalidConfig(err.to_string())
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            CleaningError::InvalidConfig("bad".to_string()).error_code(),
            "INVALID_CONFIG"
        );
        assert_eq!(
            CleaningError::UnsupportedFormat("xlsx".to_string()).error_code(),
            "UNSUPPORTED_FORMAT"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(CleaningError::UnsupportedFormat("txt".to_string()).is_recoverable());
        assert!(CleaningError::InvalidConfig("bad".to_string()).is_recoverable());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!CleaningError::Io(io).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = CleaningError::LoadFailed {
            path: "people.csv".to_string(),
            reason: "bad header".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("LOAD_FAILED"));
        assert!(json.contains("people.csv"));
    }

    #[test]
    fn test_with_context_preserves_code() {
        let error = CleaningError::UnsupportedFormat("txt".to_string()).with_context("Loading input");
        assert!(error.to_string().contains("Loading input"));
        assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_polars_result_context() {
        let res: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ColumnNotFound("missing".into()),
        );
        let err = res.context("Reading column").unwrap_err();
        assert_eq!(err.error_code(), "POLARS_ERROR");
        assert!(err.to_string().starts_with("Reading column"));
    }
}
