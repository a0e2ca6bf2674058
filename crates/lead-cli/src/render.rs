//! Terminal rendering of overviews, schemas and query results.

use std::io::{self, IsTerminal};
use std::time::Duration;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use lead_model::{ColumnKind, SchemaDescriptor, any_to_string};
use lead_normalization::EmpSizeSource;
use lead_query::{DatasetOverview, QueryOutcome};
use polars::prelude::{AnyValue, DataFrame};

/// Cell text for every shown row of a frame; nulls render as `-`.
pub fn frame_rows(frame: &DataFrame, max_rows: usize) -> Vec<Vec<String>> {
    (0..frame.height().min(max_rows))
        .map(|row| {
            frame
                .get_columns()
                .iter()
                .map(|column| match column.get(row).unwrap_or(AnyValue::Null) {
                    AnyValue::Null => "-".to_string(),
                    value => any_to_string(value),
                })
                .collect()
        })
        .collect()
}

pub fn frame_table(frame: &DataFrame, max_rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_result_table_style(&mut table);
    for (idx, column) in frame.get_columns().iter().enumerate() {
        if column.dtype().is_primitive_numeric() {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    for row in frame_rows(frame, max_rows) {
        table.add_row(row.into_iter().map(|text| {
            if text == "-" {
                dim_cell(text)
            } else {
                Cell::new(text)
            }
        }));
    }
    table
}

pub fn print_frame(frame: &DataFrame, max_rows: usize) {
    println!("{}", frame_table(frame, max_rows));
    if frame.height() > max_rows {
        println!(
            "... {} more rows not shown (use --export to save all rows)",
            frame.height() - max_rows
        );
    }
}

pub fn print_outcome(outcome: &QueryOutcome, max_rows: usize) {
    println!("{}", outcome.summary());
    if let QueryOutcome::Found(frame) = outcome {
        print_frame(frame, max_rows);
    }
}

pub fn print_overview(overview: &DatasetOverview) {
    let mut metrics = Table::new();
    metrics.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut metrics);
    align_column(&mut metrics, 1, CellAlignment::Right);
    metrics.add_row(vec![Cell::new("Total Leads"), Cell::new(overview.total_leads)]);
    metrics.add_row(vec![
        Cell::new("Number of Attributes"),
        Cell::new(overview.attributes),
    ]);
    metrics.add_row(vec![
        Cell::new("Numeric Attributes"),
        Cell::new(overview.numeric_attributes),
    ]);
    metrics.add_row(vec![
        Cell::new("Emp Size Num"),
        emp_size_cell(overview.emp_size_source.as_ref()),
    ]);
    println!("{metrics}");

    println!();
    println!("Columns: {}", overview.column_names.join(", "));

    let mut kinds = Table::new();
    kinds.set_header(vec![header_cell("Column"), header_cell("Kind")]);
    apply_table_style(&mut kinds);
    for (name, kind) in &overview.column_kinds {
        kinds.add_row(vec![Cell::new(name), kind_cell(*kind)]);
    }
    println!("{kinds}");

    println!();
    println!("Sample data:");
    print_frame(&overview.preview, overview.preview.height());
}

pub fn print_schema(schema: &SchemaDescriptor) {
    println!("Table: {}", schema.relation);
    println!("{}", schema.describe_columns());
    if !schema.sample_rows.is_empty() {
        println!();
        println!("Sample rows:");
        println!("{}", schema.render_sample_rows());
    }
}

/// Spinner on stderr while the remote call runs; hidden when stderr is not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn emp_size_cell(source: Option<&EmpSizeSource>) -> Cell {
    match source {
        Some(EmpSizeSource::Extracted(column)) => Cell::new(format!("from {column}")),
        Some(EmpSizeSource::Copied(column)) => {
            Cell::new(format!("copied from {column}")).fg(Color::Yellow)
        }
        None => dim_cell("-"),
    }
}

fn kind_cell(kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::NumericClean => Cell::new(kind).fg(Color::Green),
        ColumnKind::NumericNoisy => Cell::new(kind).fg(Color::Yellow),
        ColumnKind::Categorical => Cell::new(kind),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_result_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("Company".into(), ["Acme", "Beta", "Gamma"]).into(),
            Series::new("Revenue Size".into(), [2_500_000.0f64, 500_000.0, 1_250.5]).into(),
            Series::new("Emp Size Num".into(), [Some(51i64), None, Some(1001)]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_frame_rows_format_values() {
        let rows = frame_rows(&frame(), 10);
        assert_eq!(
            rows,
            vec![
                vec!["Acme", "2500000", "51"],
                vec!["Beta", "500000", "-"],
                vec!["Gamma", "1250.5", "1001"],
            ]
        );
    }

    #[test]
    fn test_frame_rows_respects_limit() {
        assert_eq!(frame_rows(&frame(), 2).len(), 2);
        assert!(frame_rows(&frame(), 0).is_empty());
    }

    #[test]
    fn test_frame_table_contains_headers() {
        let rendered = frame_table(&frame(), 10).to_string();
        assert!(rendered.contains("Company"));
        assert!(rendered.contains("Emp Size Num"));
        assert!(rendered.contains("Gamma"));
    }
}
