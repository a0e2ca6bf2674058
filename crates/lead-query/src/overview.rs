//! Dataset overview shown after a file is loaded.

use lead_model::{ColumnKind, PREVIEW_ROW_LIMIT};
use lead_normalization::{EmpSizeSource, NormalizedTable};
use polars::prelude::DataFrame;

/// Headline metrics and a preview of a normalized table.
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    pub total_leads: usize,
    /// All columns, including derived ones.
    pub attributes: usize,
    /// Columns with numeric storage after normalization.
    pub numeric_attributes: usize,
    pub column_names: Vec<String>,
    /// Classification of each source column.
    pub column_kinds: Vec<(String, ColumnKind)>,
    pub emp_size_source: Option<EmpSizeSource>,
    /// First rows of the table.
    pub preview: DataFrame,
}

impl DatasetOverview {
    pub fn from_table(table: &NormalizedTable) -> Self {
        let frame = &table.frame;
        Self {
            total_leads: frame.height(),
            attributes: frame.width(),
            numeric_attributes: frame
                .dtypes()
                .iter()
                .filter(|dtype| dtype.is_primitive_numeric())
                .count(),
            column_names: frame
                .get_column_names()
                .into_iter()
                .map(|name| name.to_string())
                .collect(),
            column_kinds: table
                .report
                .columns
                .iter()
                .map(|column| (column.name.clone(), column.kind))
                .collect(),
            emp_size_source: table.report.emp_size_source.clone(),
            preview: frame.head(Some(PREVIEW_ROW_LIMIT)),
        }
    }
}

#[cfg(test)]
mod tests {
    use lead_model::EMP_SIZE_NUM;
    use lead_normalization::normalize_table;
    use polars::prelude::*;

    use super::*;

    #[test]
    fn test_overview_counts() {
        let companies: Vec<String> = (0..12).map(|i| format!("Company {i}")).collect();
        let bands: Vec<&str> = (0..12).map(|_| "51-200").collect();
        let df = DataFrame::new(vec![
            Series::new("Name".into(), companies).into(),
            Series::new("Headcount".into(), bands).into(),
            Series::new("Founded".into(), (0..12).map(|i| 2000 + i).collect::<Vec<i64>>()).into(),
        ])
        .unwrap();
        let table = normalize_table(df).unwrap();

        let overview = DatasetOverview::from_table(&table);

        assert_eq!(overview.total_leads, 12);
        assert_eq!(overview.attributes, 4);
        // Founded and the derived Emp Size Num; Headcount stays text.
        assert_eq!(overview.numeric_attributes, 2);
        assert_eq!(overview.column_names.last().map(String::as_str), Some(EMP_SIZE_NUM));
        assert_eq!(overview.column_kinds.len(), 3);
        assert_eq!(overview.preview.height(), PREVIEW_ROW_LIMIT);
    }
}
