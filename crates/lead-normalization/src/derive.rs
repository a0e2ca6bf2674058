//! Derived lead columns.

use lead_model::{EMP_SIZE_NUM, EMPLOYEE_SIZE_COLUMNS, REVENUE_FALLBACK_COLUMNS, any_to_string};
use polars::prelude::*;

use crate::employee::extract_min_emp_size;

/// Where `Emp Size Num` came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmpSizeSource {
    /// Lower bounds extracted from an employee-size column.
    Extracted(String),
    /// Values copied unchanged from a revenue column because no
    /// employee-size column exists.
    Copied(String),
}

impl EmpSizeSource {
    /// Name of the source column.
    pub fn column(&self) -> &str {
        match self {
            Self::Extracted(name) | Self::Copied(name) => name,
        }
    }
}

/// Builds the `Emp Size Num` series for a table, if any source column exists.
///
/// The first present column of [`EMPLOYEE_SIZE_COLUMNS`] wins and is parsed
/// with [`extract_min_emp_size`] into a nullable `Int64`. Without one, the
/// first present column of [`REVENUE_FALLBACK_COLUMNS`] is copied as-is.
pub fn derive_emp_size_num(frame: &DataFrame) -> Option<(Series, EmpSizeSource)> {
    if let Some(column) = first_present(frame, &EMPLOYEE_SIZE_COLUMNS) {
        let values: Vec<Option<i64>> = column
            .as_materialized_series()
            .iter()
            .map(|value| extract_min_emp_size(&any_to_string(value)))
            .collect();
        let source = EmpSizeSource::Extracted(column.name().to_string());
        return Some((Series::new(EMP_SIZE_NUM.into(), values), source));
    }

    let column = first_present(frame, &REVENUE_FALLBACK_COLUMNS)?;
    let mut series = column.as_materialized_series().clone();
    series.rename(EMP_SIZE_NUM.into());
    Some((series, EmpSizeSource::Copied(column.name().to_string())))
}

fn first_present<'a>(frame: &'a DataFrame, names: &[&str]) -> Option<&'a Column> {
    names.iter().find_map(|name| frame.column(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(columns: Vec<(&str, Vec<&str>)>) -> DataFrame {
        DataFrame::new(
            columns
                .into_iter()
                .map(|(name, values)| Series::new(name.into(), values).into_column())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_headcount_is_preferred_over_size() {
        let df = frame(vec![
            ("Size", vec!["1-10", "11-50"]),
            ("Headcount", vec!["51-200", "1,001+"]),
        ]);

        let (series, source) = derive_emp_size_num(&df).unwrap();

        assert_eq!(source, EmpSizeSource::Extracted("Headcount".to_string()));
        let values = series.i64().unwrap();
        assert_eq!(values.get(0), Some(51));
        assert_eq!(values.get(1), Some(1001));
    }

    #[test]
    fn test_unparseable_bands_are_null() {
        let df = frame(vec![("LinkedIn Emp Size", vec!["250", "Unknown"])]);

        let (series, _) = derive_emp_size_num(&df).unwrap();

        assert_eq!(series.name().as_str(), EMP_SIZE_NUM);
        assert_eq!(series.i64().unwrap().get(0), Some(250));
        assert_eq!(series.null_count(), 1);
    }

    #[test]
    fn test_whole_floats_are_extracted() {
        let df = DataFrame::new(vec![
            Series::new("Size".into(), [250.0f64, 12.0]).into_column(),
        ])
        .unwrap();

        let (series, _) = derive_emp_size_num(&df).unwrap();

        assert_eq!(series.i64().unwrap().get(0), Some(250));
    }

    #[test]
    fn test_revenue_fallback_copies_values() {
        let df = frame(vec![("Revenue", vec!["$2m", "$3m"])]);

        let (series, source) = derive_emp_size_num(&df).unwrap();

        assert_eq!(source, EmpSizeSource::Copied("Revenue".to_string()));
        assert_eq!(series.str().unwrap().get(0), Some("$2m"));
    }

    #[test]
    fn test_no_source_column() {
        let df = frame(vec![("Company", vec!["Acme"])]);
        assert!(derive_emp_size_num(&df).is_none());
    }
}
