//! Employee-size range parsing.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid integer regex"));

/// Extracts the lower bound of an employee-size band.
///
/// `51-200` gives 51, `1,001+` gives 1001 and a bare `250` gives 250.
/// Anything else gives `None`.
pub fn extract_min_emp_size(raw: &str) -> Option<i64> {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();

    if cleaned.contains('+') {
        return FIRST_INTEGER.find(cleaned)?.as_str().parse().ok();
    }
    if let Some((lower, _)) = cleaned.split_once('-') {
        return parse_int(lower);
    }
    parse_int(cleaned)
}

fn parse_int(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}
