//! Spreadsheet (xls, xlsx, xlsm, xlsb, ods) loading through calamine.
//!
//! The first worksheet is read eagerly; its first row is the header. Column
//! types are inferred from the cells: date cells (or ISO date text) make a
//! `Date` column, or `Datetime` when any value has a time of day. Otherwise
//! any text makes the column textual, whole numbers become `Int64`,
//! fractional numbers `Float64` and booleans `Boolean`. Text cells holding a
//! missing-value token read as nulls.

use std::collections::HashSet;
use std::io::Cursor;

use calamine::{Data, DataType as CellType, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::missing::is_missing_token;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SheetColumnType {
    Int64,
    Float64,
    Boolean,
    Date,
    Datetime,
    Utf8,
}

/// Reads the first worksheet of an in-memory workbook into a DataFrame.
pub fn read_spreadsheet_bytes(name: &str, bytes: &[u8]) -> Result<DataFrame> {
    let spreadsheet_error = |e: calamine::Error| IngestError::Spreadsheet {
        name: name.to_string(),
        message: e.to_string(),
    };
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).map_err(spreadsheet_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            name: name.to_string(),
        })?
        .map_err(spreadsheet_error)?;

    let rows: Vec<&[Data]> = range.rows().collect();
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Ok(DataFrame::empty());
    };

    let headers = header_names(header_row);
    let mut columns = Vec::with_capacity(headers.len());
    for (col_idx, header) in headers.iter().enumerate() {
        let cells: Vec<Option<&Data>> = data_rows
            .iter()
            .map(|row| row.get(col_idx).filter(|cell| !is_missing_cell(cell)))
            .collect();
        let column_type = infer_column_type(&cells);
        columns.push(column_to_series(header, &cells, column_type)?.into_column());
    }

    let df = DataFrame::new(columns)?;
    debug!(
        file = %name,
        rows = df.height(),
        columns = df.width(),
        "decoded spreadsheet"
    );
    Ok(df)
}

/// Header names with blanks replaced and duplicates suffixed (`A`, `A.1`, ...).
fn header_names(row: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let raw = cell_text(cell).map(|text| text.trim().to_string());
            let base = match raw {
                Some(text) if !text.is_empty() => text,
                _ => format!("Unnamed: {idx}"),
            };
            let mut candidate = base.clone();
            let mut suffix = 1;
            while !seen.insert(candidate.clone()) {
                candidate = format!("{base}.{suffix}");
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn cell_text(cell: &Data) -> Option<String> {
    if cell.is_empty() {
        return None;
    }
    if cell.is_datetime()
        && let Some(datetime) = cell.as_datetime()
    {
        return Some(format_datetime(datetime));
    }
    Some(cell.as_string().unwrap_or_else(|| cell.to_string()))
}

fn format_datetime(datetime: NaiveDateTime) -> String {
    if datetime.time() == NaiveTime::MIN {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

fn is_missing_cell(cell: &Data) -> bool {
    cell.is_empty() || cell.get_string().is_some_and(is_missing_token)
}

/// Date value of a date cell, or of text in ISO date/datetime form.
fn cell_datetime(cell: &Data) -> Option<NaiveDateTime> {
    if cell.is_datetime() {
        return cell.as_datetime();
    }
    let text = cell.get_datetime_iso().or_else(|| cell.get_string())?.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

fn infer_column_type(cells: &[Option<&Data>]) -> SheetColumnType {
    let mut has_int = false;
    let mut has_fraction = false;
    let mut has_bool = false;
    let mut has_date = false;
    let mut has_text = false;
    for cell in cells.iter().flatten() {
        if cell.is_empty() {
            continue;
        }
        if cell.is_datetime() || cell.is_datetime_iso() {
            has_date = true;
        } else if cell.is_int() {
            has_int = true;
        } else if cell.is_float() {
            match cell.get_float() {
                Some(f) if f.is_finite() && (f - f.trunc()).abs() < 1e-10 => has_int = true,
                _ => has_fraction = true,
            }
        } else if cell.is_bool() {
            has_bool = true;
        } else {
            has_text = true;
        }
    }

    let has_number = has_int || has_fraction;
    if has_date || has_text {
        let all_dates = cells
            .iter()
            .flatten()
            .all(|cell| cell.is_empty() || cell_datetime(cell).is_some());
        return if !has_number && !has_bool && all_dates {
            temporal_type(cells)
        } else {
            SheetColumnType::Utf8
        };
    }
    match (has_number, has_bool) {
        (true, true) => SheetColumnType::Utf8,
        (true, false) if has_fraction => SheetColumnType::Float64,
        (true, false) => SheetColumnType::Int64,
        (false, true) => SheetColumnType::Boolean,
        (false, false) => SheetColumnType::Utf8,
    }
}

/// `Date` when every value falls on midnight, else `Datetime`.
fn temporal_type(cells: &[Option<&Data>]) -> SheetColumnType {
    let all_midnight = cells
        .iter()
        .flatten()
        .filter_map(|cell| cell_datetime(cell))
        .all(|datetime| datetime.time() == NaiveTime::MIN);
    if all_midnight {
        SheetColumnType::Date
    } else {
        SheetColumnType::Datetime
    }
}

fn column_to_series(
    name: &str,
    cells: &[Option<&Data>],
    column_type: SheetColumnType,
) -> Result<Series> {
    let series = match column_type {
        SheetColumnType::Int64 => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell.and_then(CellType::as_i64))
                .collect();
            Series::new(name.into(), values)
        }
        SheetColumnType::Float64 => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| cell.and_then(CellType::as_f64))
                .collect();
            Series::new(name.into(), values)
        }
        SheetColumnType::Boolean => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| cell.and_then(CellType::get_bool))
                .collect();
            Series::new(name.into(), values)
        }
        SheetColumnType::Date => {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
            let values: Vec<Option<i32>> = cells
                .iter()
                .map(|cell| {
                    let date = cell.and_then(cell_datetime)?.date();
                    i32::try_from((date - epoch).num_days()).ok()
                })
                .collect();
            Series::new(name.into(), values).cast(&DataType::Date)?
        }
        SheetColumnType::Datetime => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| {
                    cell.and_then(cell_datetime)
                        .map(|datetime| datetime.and_utc().timestamp_micros())
                })
                .collect();
            Series::new(name.into(), values)
                .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?
        }
        SheetColumnType::Utf8 => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| cell.and_then(cell_text))
                .collect();
            Series::new(name.into(), values)
        }
    };
    Ok(series)
}
