//! Reading and writing datasets on disk.
//!
//! The format is chosen from the file extension, case-insensitively:
//! `.csv` (with a header row) or `.json` (an array of records).

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Number of rows Polars looks at when inferring CSV column types.
const CSV_INFER_SCHEMA_ROWS: usize = 100;

/// File formats the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "json" => Ok(DatasetFormat::Json),
            _ => Err(CleaningError::UnsupportedFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Load a CSV or JSON file into a table.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let format = DatasetFormat::from_path(path)?;

    info!("Loading dataset from: {}", path.display());

    let df = match format {
        DatasetFormat::Csv => CsvReadOptions::default()
            .with_infer_schema_length(Some(CSV_INFER_SCHEMA_ROWS))
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(PathBuf::from(path)))
            .and_then(|reader| reader.finish()),
        DatasetFormat::Json => {
            let file = File::open(path)?;
            JsonReader::new(file)
                .with_json_format(JsonFormat::Json)
                .finish()
        }
    }
    .map_err(|e| CleaningError::LoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!("Loaded {:?} from {}", df.shape(), path.display());
    Ok(df)
}

/// Write a table as CSV or JSON, chosen by the extension of `path`.
pub fn save_dataset(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = DatasetFormat::from_path(path)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    match format {
        DatasetFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)?,
        DatasetFormat::Json => JsonWriter::new(&mut file)
            .with_json_format(JsonFormat::Json)
            .finish(df)?,
    }

    info!("Dataset saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("frame_cleaner_loader_{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_format_detection_is_case_insensitive() {
        assert_eq!(
            DatasetFormat::from_path(Path::new("data.CSV")).unwrap(),
            DatasetFormat::Csv
        );
        assert_eq!(
            DatasetFormat::from_path(Path::new("dir/data.Json")).unwrap(),
            DatasetFormat::Json
        );
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_dataset("data.xlsx").unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");

        let err = DatasetFormat::from_path(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, CleaningError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load_dataset(temp_path("does_not_exist.csv")).unwrap_err();
        assert!(err.is_recoverable() || matches!(err, CleaningError::Io(_)));
    }

    #[test]
    fn test_csv_save_and_load() {
        let path = temp_path("people.csv");
        let mut df = df![
            "name" => ["Ann", "Bob"],
            "age" => [31i64, 42],
        ]
        .unwrap();

        save_dataset(&mut df, &path).unwrap();
        let loaded = load_dataset(&path).unwrap();

        assert!(loaded.equals(&df));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_save_and_load() {
        let path = temp_path("people.json");
        let mut df = df![
            "name" => [Some("Ann"), None],
            "score" => [Some(1.5), Some(2.5)],
        ]
        .unwrap();

        save_dataset(&mut df, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.trim_start().starts_with('['));

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded.shape(), (2, 2));
        assert_eq!(loaded.column("name").unwrap().null_count(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
