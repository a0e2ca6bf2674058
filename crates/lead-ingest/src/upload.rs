//! Upload entry points: format detection, size guard and dispatch.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::csv::read_csv_bytes;
use crate::encoding::TextEncoding;
use crate::error::{IngestError, Result};
use crate::spreadsheet::read_spreadsheet_bytes;

/// Maximum upload size (500 MB).
pub const MAX_UPLOAD_SIZE: u64 = 500 * 1024 * 1024;

/// Tables wider than this are loaded but flagged in the logs.
const WIDE_TABLE_COLUMNS: usize = 500;

/// Container format of an uploaded file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.csv`
    Delimited,
    /// `.xls`, `.xlsx`, `.xlsm`, `.xlsb`, `.ods`
    Spreadsheet,
}

impl FileFormat {
    /// Detects the format from a file name, ignoring extension case.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(Self::Delimited),
            Some("xls" | "xlsx" | "xlsm" | "xlsb" | "ods") => Ok(Self::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                name: name.to_string(),
            }),
        }
    }
}

/// A decoded upload: the raw table plus how it was read.
#[derive(Debug, Clone)]
pub struct DecodedTable {
    pub frame: DataFrame,
    pub format: FileFormat,
    /// Encoding that decoded a delimited file; None for spreadsheets.
    pub encoding: Option<TextEncoding>,
}

/// Decodes in-memory upload bytes into a table.
pub fn decode_upload(file_name: &str, bytes: &[u8]) -> Result<DecodedTable> {
    let format = FileFormat::from_file_name(file_name)?;
    let decoded = match format {
        FileFormat::Delimited => {
            let (frame, encoding) = read_csv_bytes(file_name, bytes)?;
            DecodedTable {
                frame,
                format,
                encoding: Some(encoding),
            }
        }
        FileFormat::Spreadsheet => DecodedTable {
            frame: read_spreadsheet_bytes(file_name, bytes)?,
            format,
            encoding: None,
        },
    };

    if decoded.frame.width() > WIDE_TABLE_COLUMNS {
        warn!(
            file = %file_name,
            columns = decoded.frame.width(),
            "table has more than {WIDE_TABLE_COLUMNS} columns - may impact performance"
        );
    }
    info!(
        file = %file_name,
        rows = decoded.frame.height(),
        columns = decoded.frame.width(),
        "file loaded"
    );
    Ok(decoded)
}

/// Reads and decodes an upload from disk.
pub fn read_upload(path: &Path) -> Result<DecodedTable> {
    read_upload_with_limit(path, MAX_UPLOAD_SIZE)
}

/// Reads and decodes an upload from disk against a custom size limit.
pub fn read_upload_with_limit(path: &Path, max_size: u64) -> Result<DecodedTable> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    // Reject unsupported formats before touching the file.
    FileFormat::from_file_name(&file_name)?;

    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    decode_upload(&file_name, &bytes)
}

fn io_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            FileFormat::from_file_name("leads.csv").unwrap(),
            FileFormat::Delimited
        );
        assert_eq!(
            FileFormat::from_file_name("Leads.XLSX").unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(
            FileFormat::from_file_name("old.xls").unwrap(),
            FileFormat::Spreadsheet
        );
        assert!(matches!(
            FileFormat::from_file_name("leads.json"),
            Err(IngestError::UnsupportedFormat { .. })
        ));
        assert!(FileFormat::from_file_name("no_extension").is_err());
    }

    #[test]
    fn test_decode_upload_records_encoding() {
        let decoded = decode_upload("leads.csv", b"Company\nAcme\n").unwrap();
        assert_eq!(decoded.format, FileFormat::Delimited);
        assert_eq!(decoded.encoding, Some(TextEncoding::Utf8));
        assert_eq!(decoded.frame.height(), 1);
    }
}
