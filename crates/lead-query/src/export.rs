//! CSV export of query results.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::error::ExportError;

/// Serializes a result frame as UTF-8 CSV with a header row and no index.
pub fn results_to_csv(frame: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    let mut frame = frame.clone();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(&mut frame)?;
    Ok(buffer)
}

/// Writes a result frame to `path` as CSV.
pub fn export_results(frame: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut frame = frame.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)?;
    info!(path = %path.display(), rows = frame.height(), "exported query results");
    Ok(())
}
