//! Lead table normalization.
//!
//! Turns a raw lead table into one that can be queried numerically:
//!
//! - **classify**: decides per column whether it is categorical, noisy numeric
//!   text, or already numeric
//! - **magnitude**: parses `$2.5 million`, `450k` and friends into numbers
//! - **employee**: lower bounds of employee-size bands (`51-200` → 51)
//! - **derive**: the `Emp Size Num` column
//! - **normalize**: the whole-table pass and its report

mod classify;
mod clean;
mod derive;
mod employee;
mod error;
mod magnitude;
mod normalize;

pub use classify::classify;
pub use clean::{CleanedColumn, clean_column};
pub use derive::{EmpSizeSource, derive_emp_size_num};
pub use employee::extract_min_emp_size;
pub use error::{NormalizationError, Result};
pub use magnitude::clean_magnitude;
pub use normalize::{ColumnReport, NormalizationReport, NormalizedTable, normalize_table};
