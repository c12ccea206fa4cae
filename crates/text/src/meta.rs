use once_cell::sync::Lazy;
use regex::Regex;

/// Parenthetical asides about length or detail, removed anywhere in the text
/// e.g. "(약 500자)", "(글자수: 330)", "(자세한 내용 포함, 330자)"
const PARENTHETICAL_PATTERNS: &[&str] = &[
    r"\s*\([^)]*[0-9]+자[^)]*\)",
    r"\s*\([^)]*글자[^)]*\)",
    r"\s*\([^)]*자세한[^)]*\)",
    r"\s*\([^)]*내용\s*포함[^)]*\)",
];

/// Length annotations anchored to the end of the text
/// e.g. "--- 330자", "[330자]", "330자"
const TRAILING_PATTERNS: &[&str] = &[
    r"\s*[-─]+\s*[0-9]+자\s*$",
    r"\s*\[[0-9]+자\]\s*$",
    r"\s*[0-9]+자\s*$",
];

/// Analysis/verification tags, removed anywhere in the text
const BRACKET_PATTERNS: &[&str] = &[r"\s*\[분석[^\]]*\]", r"\s*\[검증[^\]]*\]"];

static META_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    PARENTHETICAL_PATTERNS
        .iter()
        .chain(TRAILING_PATTERNS)
        .chain(BRACKET_PATTERNS)
        .map(|p| Regex::new(p).expect("meta pattern must compile"))
        .collect()
});

/// Remove meta commentary (length notes, analysis tags) leaked by the model
///
/// Best effort: text that matches none of the known shapes passes through
/// untouched. The result is trimmed.
pub fn strip_meta(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = text.to_string();
    for re in META_PATTERNS.iter() {
        cleaned = re.replace_all(&cleaned, "").into_owned();
    }

    cleaned.trim().to_string()
}
