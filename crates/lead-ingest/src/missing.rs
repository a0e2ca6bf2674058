//! Cell text that stands for a missing value.

/// Tokens read as null in delimited text and spreadsheet text cells.
///
/// Matches the default NA set of pandas' readers; the empty string is
/// handled by the readers themselves.
pub const MISSING_VALUE_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(crate) fn is_missing_token(text: &str) -> bool {
    MISSING_VALUE_TOKENS.contains(&text)
}
