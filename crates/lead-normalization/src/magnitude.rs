//! Magnitude-aware number cleaning.
//!
//! Lead exports write money and counts the way people say them: `$2.5
//! million`, `450k`, `1,200`. [`clean_magnitude`] turns such text into a
//! plain `f64`.

use std::sync::LazyLock;

use regex::Regex;

/// First run of digits and dots, used when a scale word is present.
static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9.]+").expect("Invalid number regex"));

/// Scale words, checked in this order.
const WORD_SCALES: [(&str, f64); 3] = [
    ("billion", 1_000_000_000.0),
    ("million", 1_000_000.0),
    ("thousand", 1_000.0),
];

/// Single-letter suffixes, checked after the scale words.
const SUFFIX_SCALES: [(char, f64); 3] = [
    ('b', 1_000_000_000.0),
    ('m', 1_000_000.0),
    ('k', 1_000.0),
];

/// Converts human-written magnitude text into a number.
///
/// `$` and `,` are removed and the text is lowercased and trimmed. A scale
/// word multiplies the first number found in the text; otherwise a `b`, `m`
/// or `k` anywhere in the text is removed and multiplies what remains.
/// Text that still does not parse yields `None`.
///
/// ```
/// use lead_normalization::clean_magnitude;
///
/// assert_eq!(clean_magnitude("$2.5 million"), Some(2_500_000.0));
/// assert_eq!(clean_magnitude("450k"), Some(450_000.0));
/// assert_eq!(clean_magnitude("n/a"), None);
/// ```
pub fn clean_magnitude(raw: &str) -> Option<f64> {
    let stripped: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let lowered = stripped.to_lowercase();
    let value = lowered.trim();

    for (word, scale) in WORD_SCALES {
        if value.contains(word) {
            let number = FIRST_NUMBER.find(value)?;
            return parse_float(number.as_str()).map(|n| n * scale);
        }
    }

    for (suffix, scale) in SUFFIX_SCALES {
        if value.contains(suffix) {
            return parse_float(&value.replace(suffix, "")).map(|n| n * scale);
        }
    }

    parse_float(value)
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}
