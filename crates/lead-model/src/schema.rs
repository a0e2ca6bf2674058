//! Schema descriptor used to ground translation prompts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A column name with its storage type as reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: String,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// One example row, cells kept in column order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleRow {
    pub cells: Vec<(String, Value)>,
}

impl SampleRow {
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.cells.push((name.into(), value));
    }

    /// Renders the row as a single-line JSON object with keys in column order.
    pub fn render(&self) -> String {
        let body = self
            .cells
            .iter()
            .map(|(name, value)| format!("{}: {}", Value::String(name.clone()), value))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{{{body}}}")
    }
}

/// Columns, storage types and a handful of example rows of the active table.
///
/// Built fresh from the normalized table for every question so it always
/// reflects the data currently registered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    pub relation: String,
    pub columns: Vec<ColumnSchema>,
    pub sample_rows: Vec<SampleRow>,
}

impl SchemaDescriptor {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    /// One `- "name" (type)` line per column.
    pub fn describe_columns(&self) -> String {
        self.columns
            .iter()
            .map(|column| format!("- \"{}\" ({})", column.name, column.data_type))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One JSON object line per sample row.
    pub fn render_sample_rows(&self) -> String {
        self.sample_rows
            .iter()
            .map(SampleRow::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> SchemaDescriptor {
        let mut row = SampleRow::default();
        row.push("Company", Value::from("Acme \"Labs\""));
        row.push("Revenue Size", Value::from(2_500_000.0));
        row.push("Emp Size Num", Value::from(51));
        SchemaDescriptor {
            relation: "leads".to_string(),
            columns: vec![
                ColumnSchema::new("Company", "str"),
                ColumnSchema::new("Revenue Size", "f64"),
                ColumnSchema::new("Emp Size Num", "i64"),
            ],
            sample_rows: vec![row],
        }
    }

    #[test]
    fn describes_columns_in_order() {
        insta::assert_snapshot!(descriptor().describe_columns(), @r#"
        - "Company" (str)
        - "Revenue Size" (f64)
        - "Emp Size Num" (i64)
        "#);
    }

    #[test]
    fn sample_rows_keep_column_order_and_escape_text() {
        assert_eq!(
            descriptor().render_sample_rows(),
            r#"{"Company": "Acme \"Labs\"", "Revenue Size": 2500000.0, "Emp Size Num": 51}"#
        );
    }

    #[test]
    fn has_column_is_exact() {
        let schema = descriptor();
        assert!(schema.has_column("Revenue Size"));
        assert!(!schema.has_column("revenue size"));
    }
}
