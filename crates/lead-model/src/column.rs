use std::fmt;

use serde::{Deserialize, Serialize};

/// How a source column is treated during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Text without any digit; nulls become `"Unknown"`.
    Categorical,
    /// Text carrying numbers with noise (currency, magnitude suffixes, ranges).
    NumericNoisy,
    /// Already numeric storage; nulls become the column median.
    NumericClean,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Categorical => "categorical",
            Self::NumericNoisy => "numeric (noisy)",
            Self::NumericClean => "numeric",
        }
    }

    /// True for both numeric variants.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::NumericNoisy | Self::NumericClean)
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
