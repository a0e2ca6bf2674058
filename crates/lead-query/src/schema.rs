//! Schema descriptors built from the registered table.

use lead_model::{ColumnSchema, SAMPLE_ROW_LIMIT, SampleRow, SchemaDescriptor, any_to_json};
use polars::prelude::*;

/// Describes a table's columns and first rows for prompt grounding.
///
/// Storage types use Polars' short names (`str`, `f64`, `i64`). At most
/// [`SAMPLE_ROW_LIMIT`] rows are sampled, cells in column order.
pub fn describe_table(frame: &DataFrame, relation: &str) -> SchemaDescriptor {
    let columns = frame
        .get_columns()
        .iter()
        .map(|column| ColumnSchema::new(column.name().as_str(), column.dtype().to_string()))
        .collect();

    let sample_rows = (0..frame.height().min(SAMPLE_ROW_LIMIT))
        .map(|row_idx| {
            let mut row = SampleRow::default();
            for column in frame.get_columns() {
                let value = column.get(row_idx).map_or(serde_json::Value::Null, any_to_json);
                row.push(column.name().as_str(), value);
            }
            row
        })
        .collect();

    SchemaDescriptor {
        relation: relation.to_string(),
        columns,
        sample_rows,
    }
}
