//! Per-column cleaning and null filling.

use lead_model::{ColumnKind, UNKNOWN_FILL, any_to_string, format_numeric};
use polars::prelude::*;

use crate::error::Result;
use crate::magnitude::clean_magnitude;

/// A cleaned column plus what cleaning did to it.
#[derive(Debug, Clone)]
pub struct CleanedColumn {
    pub column: Column,
    /// Null cells that received a fill value.
    pub filled: usize,
    /// Non-null cells of a noisy column that did not parse and kept their text.
    pub kept_text: usize,
}

impl CleanedColumn {
    fn untouched(column: &Column) -> Self {
        Self {
            column: column.clone(),
            filled: 0,
            kept_text: 0,
        }
    }
}

/// Cleans a column according to its classification.
pub fn clean_column(column: &Column, kind: ColumnKind) -> Result<CleanedColumn> {
    match kind {
        ColumnKind::NumericNoisy => clean_noisy(column),
        ColumnKind::NumericClean => fill_numeric(column),
        ColumnKind::Categorical => fill_categorical(column),
    }
}

/// Median of the present values, `None` when nothing is present.
pub fn median_of(values: &[Option<f64>]) -> Option<f64> {
    Series::new(PlSmallStr::EMPTY, values).median()
}

/// Parses every cell of a column as a magnitude, whatever its dtype.
///
/// Numeric cells pass through as `f64`; other cells are rendered as text and
/// run through [`clean_magnitude`].
pub fn magnitudes(column: &Column) -> Result<Vec<Option<f64>>> {
    if column.dtype().is_primitive_numeric() {
        let floats = column.cast(&DataType::Float64)?;
        return Ok(floats.f64()?.into_iter().collect());
    }
    let series = column.as_materialized_series();
    Ok(series
        .iter()
        .map(|value| match value {
            AnyValue::Null => None,
            other => clean_magnitude(&any_to_string(other)),
        })
        .collect())
}

/// Builds a `Float64` series with nulls replaced by `fill` when one exists.
pub fn filled_float_series(
    name: PlSmallStr,
    values: &[Option<f64>],
    fill: Option<f64>,
) -> (Series, usize) {
    let filled = match fill {
        Some(_) => values.iter().filter(|v| v.is_none()).count(),
        None => 0,
    };
    let values: Vec<Option<f64>> = values.iter().map(|v| v.or(fill)).collect();
    (Series::new(name, values), filled)
}

fn clean_noisy(column: &Column) -> Result<CleanedColumn> {
    let name = column.name().clone();
    let originals = column.str()?;
    let converted: Vec<Option<f64>> = originals
        .into_iter()
        .map(|value| value.and_then(clean_magnitude))
        .collect();
    let kept_text = originals
        .into_iter()
        .zip(&converted)
        .filter(|(original, parsed)| original.is_some() && parsed.is_none())
        .count();
    let median = median_of(&converted);

    if kept_text == 0 {
        let (series, filled) = filled_float_series(name, &converted, median);
        return Ok(CleanedColumn {
            column: series.into_column(),
            filled,
            kept_text,
        });
    }

    // Mixed column: parsed cells are rendered as numbers, the rest keep their text.
    let fill = median.map_or_else(|| UNKNOWN_FILL.to_string(), format_numeric);
    let mut filled = 0;
    let values: Vec<String> = originals
        .into_iter()
        .zip(&converted)
        .map(|(original, parsed)| match (parsed, original) {
            (Some(number), _) => format_numeric(*number),
            (None, Some(text)) => text.to_string(),
            (None, None) => {
                filled += 1;
                fill.clone()
            }
        })
        .collect();
    Ok(CleanedColumn {
        column: Series::new(name, values).into_column(),
        filled,
        kept_text,
    })
}

fn fill_numeric(column: &Column) -> Result<CleanedColumn> {
    if column.null_count() == 0 {
        return Ok(CleanedColumn::untouched(column));
    }
    let floats = column.cast(&DataType::Float64)?;
    let values: Vec<Option<f64>> = floats.f64()?.into_iter().collect();
    let (series, filled) = filled_float_series(column.name().clone(), &values, median_of(&values));
    Ok(CleanedColumn {
        column: series.into_column(),
        filled,
        kept_text: 0,
    })
}

fn fill_categorical(column: &Column) -> Result<CleanedColumn> {
    let filled = column.null_count();
    if filled == 0 {
        return Ok(CleanedColumn::untouched(column));
    }
    let text = column.cast(&DataType::String)?;
    let values: Vec<&str> = text
        .str()?
        .into_iter()
        .map(|value| value.unwrap_or(UNKNOWN_FILL))
        .collect();
    Ok(CleanedColumn {
        column: Series::new(column.name().clone(), values).into_column(),
        filled,
        kept_text: 0,
    })
}
