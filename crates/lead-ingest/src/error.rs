//! Error types for lead file decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning an uploaded file into a table.
///
/// Every variant is fatal for the upload: the user has to provide another file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds maximum allowed size.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Format Errors ===
    /// Extension is neither delimited text nor a spreadsheet.
    #[error("unsupported file format: {name} (expected .csv, .xls or .xlsx)")]
    UnsupportedFormat { name: String },

    /// No supported encoding produced a parseable CSV.
    #[error("unable to decode {name} with any supported encoding ({tried}): {message}")]
    Undecodable {
        name: String,
        tried: String,
        message: String,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {name}: {message}")]
    CsvParse { name: String, message: String },

    /// Spreadsheet container could not be opened or read.
    #[error("failed to read spreadsheet {name}: {message}")]
    Spreadsheet { name: String, message: String },

    /// Spreadsheet has no worksheet to read.
    #[error("spreadsheet has no worksheets: {name}")]
    EmptyWorkbook { name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::UnsupportedFormat {
            name: "leads.json".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported file format: leads.json (expected .csv, .xls or .xlsx)"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
