//! Error types for reference-range loading.

use std::path::PathBuf;

use labrange_model::ModelError;
use thiserror::Error;

/// Errors that can occur when loading a reference-range table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Failed to read a range file from disk.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV content.
    #[error("failed to parse CSV {source_name}: {message}")]
    CsvParse {
        source_name: String,
        message: String,
    },

    /// Failed to parse JSON content.
    #[error("failed to parse JSON {source_name}: {source}")]
    JsonParse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A row describes an invalid range.
    #[error("invalid range in {source_name} (line {line}): {source}")]
    InvalidRange {
        source_name: String,
        line: usize,
        #[source]
        source: ModelError,
    },

    /// The same key appears twice.
    #[error("duplicate biomarker key '{key}'")]
    DuplicateKey { key: String },

    /// File extension is not `.csv` or `.json`.
    #[error("unsupported range file format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for range loading operations.
pub type Result<T> = std::result::Result<T, StandardsError>;
