//! Label and separator clean-up

use regex::Regex;
use std::sync::OnceLock;

static TRAILING_WEIGHT: OnceLock<Regex> = OnceLock::new();
static LEADING_WEIGHT: OnceLock<Regex> = OnceLock::new();

fn trailing_weight() -> &'static Regex {
    TRAILING_WEIGHT.get_or_init(|| {
        Regex::new(r"\s*\(\d+\.\d+\)\s*$").expect("trailing qualifier pattern is valid")
    })
}

fn leading_weight() -> &'static Regex {
    LEADING_WEIGHT
        .get_or_init(|| Regex::new(r"^\s*\(\d+\)\s*").expect("leading qualifier pattern is valid"))
}

/// Strip a trailing "(n.n)" qualifier from a pyramid SCU label
pub fn clean_scu_label(label: &str) -> String {
    trailing_weight().replace(label, "").trim().to_string()
}

/// Strip a leading "(n)" and a trailing "(n.n)" qualifier from an annotated
/// SCU label
pub fn clean_annotated_scu_label(label: &str) -> String {
    let without_weight = leading_weight().replace(label, "");
    clean_scu_label(&without_weight)
}

/// Summarizer id carried by a matched document separator
///
/// Leading and trailing whitespace and dashes are removed, then the last
/// `.`-delimited segment is the id: `"---- D0701.M.250.A.C ----"` gives `"C"`.
pub fn summarizer_id_from_separator(separator: &str) -> String {
    let trimmed = separator.trim_matches(|ch: char| ch.is_whitespace() || ch == '-');
    trimmed.rsplit('.').next().unwrap_or(trimmed).to_string()
}
