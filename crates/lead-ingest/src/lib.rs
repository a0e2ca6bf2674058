//! Lead file ingestion.
//!
//! This crate turns an uploaded lead file into a Polars `DataFrame` with
//! column types left as the file presents them. Cleaning happens later, in
//! `lead-normalization`.
//!
//! # Features
//!
//! - **Format Detection**: `.csv` is delimited text; `.xls`/`.xlsx` (and other
//!   calamine formats) are spreadsheets; anything else is rejected
//! - **Encoding Fallback**: delimited text is tried as UTF-8, then latin1,
//!   iso-8859-1, cp1252, utf-16 and utf-32
//! - **Missing Values**: pandas' NA tokens (`n/a`, `NA`, `null`, ...) read as
//!   nulls, and ISO date text becomes `Date`/`Datetime`
//! - **Size Guard**: uploads above [`MAX_UPLOAD_SIZE`] are refused
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lead_ingest::read_upload;
//!
//! let decoded = read_upload(Path::new("leads.csv"))?;
//! println!("{} rows", decoded.frame.height());
//! ```

mod csv;
mod encoding;
mod error;
mod missing;
mod spreadsheet;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === Encodings ===
pub use encoding::{ENCODING_FALLBACK_ORDER, TextEncoding};

// === Readers ===
pub use missing::MISSING_VALUE_TOKENS;
pub use csv::{parse_csv_text, read_csv_bytes};
pub use spreadsheet::read_spreadsheet_bytes;

// === Uploads ===
pub use upload::{
    DecodedTable, FileFormat, MAX_UPLOAD_SIZE, decode_upload, read_upload, read_upload_with_limit,
};
