//! Column classification.

use lead_model::ColumnKind;
use polars::prelude::{Column, DataType};

/// Decides how a column will be cleaned.
///
/// - Primitive numeric dtypes are [`ColumnKind::NumericClean`].
/// - Text columns where any value contains a digit are
///   [`ColumnKind::NumericNoisy`].
/// - Everything else (text without digits, booleans, dates) is
///   [`ColumnKind::Categorical`].
pub fn classify(column: &Column) -> ColumnKind {
    let dtype = column.dtype();
    if dtype.is_primitive_numeric() {
        return ColumnKind::NumericClean;
    }
    if !matches!(dtype, DataType::String) {
        return ColumnKind::Categorical;
    }

    let has_digit = column.str().is_ok_and(|values| {
        values
            .into_iter()
            .flatten()
            .any(|value| value.chars().any(|c| c.is_ascii_digit()))
    });
    if has_digit {
        ColumnKind::NumericNoisy
    } else {
        ColumnKind::Categorical
    }
}
