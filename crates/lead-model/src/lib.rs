//! Shared data model for the lead query workspace.
//!
//! This crate holds the pieces every other crate agrees on:
//!
//! - **names**: the relation name, derived column names and column priority lists
//! - **column**: the per-column classification produced by normalization
//! - **schema**: the schema descriptor used to ground translation prompts
//! - **polars_utils**: `AnyValue` conversion helpers

pub mod column;
pub mod names;
pub mod polars_utils;
pub mod schema;

pub use column::ColumnKind;
pub use names::{
    EMP_SIZE_NUM, EMPLOYEE_SIZE_COLUMNS, EXPORT_FILE_NAME, LEADS_RELATION, PREVIEW_ROW_LIMIT,
    REVENUE_FALLBACK_COLUMNS, REVENUE_SIZE, SAMPLE_ROW_LIMIT, UNKNOWN_FILL,
};
pub use polars_utils::{any_to_json, any_to_string, format_numeric};
pub use schema::{ColumnSchema, SampleRow, SchemaDescriptor};
