//! Tests for whole-table lead normalization.

use lead_model::{ColumnKind, EMP_SIZE_NUM, REVENUE_SIZE, UNKNOWN_FILL};
use lead_normalization::{EmpSizeSource, clean_magnitude, extract_min_emp_size, normalize_table};
use polars::prelude::*;
use proptest::prelude::*;

fn leads_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new("Company".into(), [Some("Acme"), Some("Beta"), Some("Gamma")]).into(),
        Series::new("Industry".into(), [Some("Retail"), None, Some("Finance")]).into(),
        Series::new(
            "Revenue Size".into(),
            [Some("$2.5 million"), Some("$500k"), None],
        )
        .into(),
        Series::new(
            "Headcount".into(),
            [Some("51-200"), Some("1,001+"), Some("11-50")],
        )
        .into(),
        Series::new("Size".into(), [Some("1-10"), Some("1-10"), Some("1-10")]).into(),
        Series::new("Founded".into(), [Some(1999i64), None, Some(2011)]).into(),
    ])
    .unwrap()
}

#[test]
fn test_source_columns_are_null_free() {
    let normalized = normalize_table(leads_frame()).unwrap();

    for column in normalized.frame.get_columns() {
        if column.name().as_str() == EMP_SIZE_NUM {
            continue;
        }
        assert_eq!(column.null_count(), 0, "column {} has nulls", column.name());
    }
}

#[test]
fn test_revenue_is_numeric_and_median_filled() {
    let normalized = normalize_table(leads_frame()).unwrap();

    let revenue = normalized.frame.column(REVENUE_SIZE).unwrap().f64().unwrap();
    assert_eq!(revenue.get(0), Some(2_500_000.0));
    assert_eq!(revenue.get(1), Some(500_000.0));
    assert_eq!(revenue.get(2), Some(1_500_000.0));
    assert!(normalized.report.revenue_cleaned);
}

#[test]
fn test_emp_size_num_prefers_headcount() {
    let normalized = normalize_table(leads_frame()).unwrap();

    assert_eq!(
        normalized.report.emp_size_source,
        Some(EmpSizeSource::Extracted("Headcount".to_string()))
    );
    let emp = normalized.frame.column(EMP_SIZE_NUM).unwrap().i64().unwrap();
    assert_eq!(emp.get(0), Some(51));
    assert_eq!(emp.get(1), Some(1001));
    assert_eq!(emp.get(2), Some(11));
}

#[test]
fn test_categorical_and_numeric_fills() {
    let normalized = normalize_table(leads_frame()).unwrap();

    let industry = normalized.frame.column("Industry").unwrap().str().unwrap();
    assert_eq!(industry.get(1), Some(UNKNOWN_FILL));

    let founded = normalized.frame.column("Founded").unwrap().f64().unwrap();
    assert_eq!(founded.get(1), Some(2005.0));
}

#[test]
fn test_report_records_kinds() {
    let normalized = normalize_table(leads_frame()).unwrap();
    let kinds: Vec<(&str, ColumnKind)> = normalized
        .report
        .columns
        .iter()
        .map(|c| (c.name.as_str(), c.kind))
        .collect();

    assert_eq!(
        kinds,
        vec![
            ("Company", ColumnKind::Categorical),
            ("Industry", ColumnKind::Categorical),
            ("Revenue Size", ColumnKind::NumericNoisy),
            ("Headcount", ColumnKind::NumericNoisy),
            ("Size", ColumnKind::NumericNoisy),
            ("Founded", ColumnKind::NumericClean),
        ]
    );
    assert_eq!(normalized.report.numeric_columns(), 4);
}

#[test]
fn test_revenue_fallback_is_flagged() {
    let df = DataFrame::new(vec![
        Series::new("Company".into(), ["Acme", "Beta"]).into(),
        Series::new("Annual Revenue".into(), ["$2m", "$3m"]).into(),
    ])
    .unwrap();

    let normalized = normalize_table(df).unwrap();

    assert_eq!(
        normalized.report.emp_size_source,
        Some(EmpSizeSource::Copied("Annual Revenue".to_string()))
    );
    // Copied after cleaning, so the values are already numeric.
    let emp = normalized.frame.column(EMP_SIZE_NUM).unwrap().f64().unwrap();
    assert_eq!(emp.get(0), Some(2_000_000.0));
    assert!(!normalized.report.revenue_cleaned);
}

#[test]
fn test_no_derivable_column() {
    let df = DataFrame::new(vec![Series::new("Company".into(), ["Acme"]).into()]).unwrap();

    let normalized = normalize_table(df).unwrap();

    assert!(normalized.frame.column(EMP_SIZE_NUM).is_err());
    assert_eq!(normalized.report.emp_size_source, None);
}

#[test]
fn test_all_null_numeric_column_stays_null() {
    let df = DataFrame::new(vec![Series::new("Score".into(), [None::<f64>, None]).into()]).unwrap();

    let normalized = normalize_table(df).unwrap();

    assert_eq!(normalized.frame.column("Score").unwrap().null_count(), 2);
}

#[test]
fn test_documented_conversions() {
    assert_eq!(clean_magnitude("$1.2 million"), Some(1_200_000.0));
    assert_eq!(clean_magnitude("3B"), Some(3e9));
    assert_eq!(clean_magnitude("450k"), Some(450_000.0));
    assert_eq!(clean_magnitude("n/a"), None);

    assert_eq!(extract_min_emp_size("1001-5000"), Some(1001));
    assert_eq!(extract_min_emp_size("10,001+"), Some(10001));
    assert_eq!(extract_min_emp_size("250"), Some(250));
    assert_eq!(extract_min_emp_size("unknown"), None);
}

proptest! {
    #[test]
    fn prop_cleaners_never_panic(raw in ".{0,40}") {
        let _ = clean_magnitude(&raw);
        let _ = extract_min_emp_size(&raw);
    }

    #[test]
    fn prop_plain_integers_round_trip(n in 0i64..1_000_000_000) {
        prop_assert_eq!(extract_min_emp_size(&n.to_string()), Some(n));
        prop_assert_eq!(clean_magnitude(&n.to_string()), Some(n as f64));
    }
}
