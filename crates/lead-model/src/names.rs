//! Well-known relation and column names.

/// Relation name the normalized table is registered under.
pub const LEADS_RELATION: &str = "leads";

/// Derived numeric employee-size column.
pub const EMP_SIZE_NUM: &str = "Emp Size Num";

/// Revenue column that is always numeric-cleaned in place.
pub const REVENUE_SIZE: &str = "Revenue Size";

/// Fill value for categorical columns.
pub const UNKNOWN_FILL: &str = "Unknown";

/// Employee-size source columns, highest priority first.
pub const EMPLOYEE_SIZE_COLUMNS: [&str; 4] =
    ["Employee Size range", "LinkedIn Emp Size", "Headcount", "Size"];

/// Revenue columns copied into `Emp Size Num` when no employee-size column exists.
pub const REVENUE_FALLBACK_COLUMNS: [&str; 2] = ["Revenue Size", "Annual Revenue"];

/// File name offered for exported query results.
pub const EXPORT_FILE_NAME: &str = "almo_media_lead_query_results.csv";

/// Sample rows embedded in a schema descriptor.
pub const SAMPLE_ROW_LIMIT: usize = 5;

/// Rows shown in a dataset preview.
pub const PREVIEW_ROW_LIMIT: usize = 10;
