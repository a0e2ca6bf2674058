//! Delimited text reading with encoding fallback.

use std::io::Cursor;

use polars::prelude::*;
use tracing::debug;

use crate::encoding::{ENCODING_FALLBACK_ORDER, TextEncoding};
use crate::error::{IngestError, Result};
use crate::missing::MISSING_VALUE_TOKENS;

/// Parses already-decoded CSV text into a DataFrame.
///
/// The first row is the header; column types are inferred over the whole
/// file. Empty fields and [`MISSING_VALUE_TOKENS`] become nulls, and
/// columns of ISO dates are read as `Date` or `Datetime`.
pub fn parse_csv_text(name: &str, text: String) -> Result<DataFrame> {
    let cursor = Cursor::new(text.into_bytes());
    let null_values = NullValues::AllColumns(
        MISSING_VALUE_TOKENS
            .into_iter()
            .map(PlSmallStr::from_static)
            .collect(),
    );
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| {
            options
                .with_null_values(Some(null_values.clone()))
                .with_try_parse_dates(true)
        })
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| IngestError::CsvParse {
            name: name.to_string(),
            message: e.to_string(),
        })
}

/// Decodes raw CSV bytes, trying each supported encoding in turn.
///
/// An encoding is accepted once the bytes decode cleanly *and* the text
/// parses as CSV. Returns the table and the encoding that worked.
pub fn read_csv_bytes(name: &str, bytes: &[u8]) -> Result<(DataFrame, TextEncoding)> {
    let mut last_error = String::from("no encoding attempted");

    for encoding in ENCODING_FALLBACK_ORDER {
        let Some(text) = encoding.decode(bytes) else {
            debug!(file = %name, encoding = %encoding, "encoding rejected input");
            last_error = format!("input is not valid {encoding}");
            continue;
        };
        match parse_csv_text(name, text) {
            Ok(df) => {
                debug!(
                    file = %name,
                    encoding = %encoding,
                    rows = df.height(),
                    columns = df.width(),
                    "decoded delimited file"
                );
                return Ok((df, encoding));
            }
            Err(error) => {
                debug!(file = %name, encoding = %encoding, error = %error, "csv parse failed");
                last_error = error.to_string();
            }
        }
    }

    Err(IngestError::Undecodable {
        name: name.to_string(),
        tried: ENCODING_FALLBACK_ORDER
            .iter()
            .map(|encoding| encoding.label())
            .collect::<Vec<_>>()
            .join(", "),
        message: last_error,
    })
}
