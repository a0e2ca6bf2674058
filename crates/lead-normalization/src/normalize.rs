//! Whole-table normalization.

use lead_model::{ColumnKind, REVENUE_SIZE};
use polars::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::classify::classify;
use crate::clean::{clean_column, filled_float_series, magnitudes, median_of};
use crate::derive::{EmpSizeSource, derive_emp_size_num};
use crate::error::Result;

/// A normalized lead table and what normalization did to it.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub frame: DataFrame,
    pub report: NormalizationReport,
}

/// Per-column outcome of normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnReport {
    pub name: String,
    pub kind: ColumnKind,
    /// Null cells that received a fill value.
    pub filled: usize,
    /// Unparseable cells of a noisy column that kept their text.
    pub kept_text: usize,
}

/// Summary of a normalization run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Source columns, in table order.
    pub columns: Vec<ColumnReport>,
    /// How `Emp Size Num` was produced; `None` when it was not.
    pub emp_size_source: Option<EmpSizeSource>,
    /// Whether `Revenue Size` was cleaned in place.
    pub revenue_cleaned: bool,
}

impl NormalizationReport {
    /// Number of source columns classified as numeric.
    pub fn numeric_columns(&self) -> usize {
        self.columns.iter().filter(|c| c.kind.is_numeric()).count()
    }

    /// Total cells filled across all source columns.
    pub fn filled_cells(&self) -> usize {
        self.columns.iter().map(|c| c.filled).sum()
    }
}

/// Normalizes a raw lead table.
///
/// Every source column is classified and cleaned, then `Emp Size Num` is
/// derived, then `Revenue Size` is magnitude-cleaned in place and its nulls
/// refilled with its median. Cell-level anomalies never fail the run; only
/// DataFrame rebuilding errors are returned.
pub fn normalize_table(raw: DataFrame) -> Result<NormalizedTable> {
    let span = info_span!("normalize", rows = raw.height(), columns = raw.width());
    let _guard = span.enter();

    let mut columns = Vec::with_capacity(raw.width());
    let mut reports = Vec::with_capacity(raw.width());
    for column in raw.get_columns() {
        let kind = classify(column);
        let cleaned = clean_column(column, kind)?;
        debug!(
            column = %column.name(),
            kind = %kind,
            filled = cleaned.filled,
            kept_text = cleaned.kept_text,
            "cleaned column"
        );
        reports.push(ColumnReport {
            name: column.name().to_string(),
            kind,
            filled: cleaned.filled,
            kept_text: cleaned.kept_text,
        });
        columns.push(cleaned.column);
    }
    let mut frame = DataFrame::new(columns)?;

    let emp_size_source = match derive_emp_size_num(&frame) {
        Some((series, source)) => {
            if let EmpSizeSource::Copied(column) = &source {
                warn!(
                    column = %column,
                    "no employee-size column found; Emp Size Num copies revenue values"
                );
            }
            frame.with_column(series)?;
            Some(source)
        }
        None => None,
    };

    let revenue_cleaned = match frame.column(REVENUE_SIZE) {
        Ok(column) => {
            let values = magnitudes(column)?;
            let (series, filled) =
                filled_float_series(REVENUE_SIZE.into(), &values, median_of(&values));
            if filled > 0 {
                debug!(filled, "refilled Revenue Size after magnitude cleaning");
            }
            frame.with_column(series)?;
            true
        }
        Err(_) => false,
    };

    let report = NormalizationReport {
        columns: reports,
        emp_size_source,
        revenue_cleaned,
    };
    info!(
        rows = frame.height(),
        columns = frame.width(),
        numeric = report.numeric_columns(),
        filled = report.filled_cells(),
        "normalized lead table"
    );
    Ok(NormalizedTable { frame, report })
}
