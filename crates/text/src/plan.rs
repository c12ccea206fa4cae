use serde::{Deserialize, Serialize};

/// Default target when the selector or manual value is unusable (1500 bytes)
pub const DEFAULT_TARGET_CHARS: usize = 500;

/// Output size selector, labelled in NEIS bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextLength {
    /// 1500byte (한글 약 500자)
    #[default]
    Bytes1500,
    /// 1000byte (한글 약 330자)
    Bytes1000,
    /// 600byte (한글 약 200자)
    Bytes600,
    /// Caller-supplied character count
    Manual(usize),
}

impl TextLength {
    /// Parse a selector value ("1500", "1000", "600", "manual")
    ///
    /// Unknown selectors fall back to 1500 bytes; a manual value that does not
    /// parse to a positive number falls back to [`DEFAULT_TARGET_CHARS`].
    pub fn parse(selector: &str, manual: Option<&str>) -> Self {
        match selector.trim() {
            "1000" => Self::Bytes1000,
            "600" => Self::Bytes600,
            "manual" => {
                let chars = manual
                    .and_then(|m| m.trim().parse::<usize>().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(DEFAULT_TARGET_CHARS);
                Self::Manual(chars)
            }
            _ => Self::Bytes1500,
        }
    }

    /// Target character count for this selector
    pub fn target_chars(&self) -> usize {
        match self {
            Self::Bytes1500 => 500,
            Self::Bytes1000 => 330,
            Self::Bytes600 => 200,
            Self::Manual(n) => *n,
        }
    }
}

/// Maximum number of activities worth describing in `target_chars`
///
/// `None` means every activity can be used.
pub fn max_activities(target_chars: usize) -> Option<usize> {
    match target_chars {
        0..=79 => Some(1),
        80..=150 => Some(2),
        151..=250 => Some(3),
        251..=350 => Some(4),
        _ => None,
    }
}

fn keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keyword overlap between a shared activity and a student's own activity
///
/// Counts the student's keywords (longer than one character) that contain,
/// or are contained in, any keyword of the shared activity.
pub fn relevance_score(common_activity: &str, individual_activity: &str) -> usize {
    if common_activity.is_empty() || individual_activity.is_empty() {
        return 0;
    }

    let common = keywords(common_activity);
    keywords(individual_activity)
        .iter()
        .filter(|k| k.chars().count() > 1)
        .filter(|k| {
            common
                .iter()
                .any(|c| c.contains(k.as_str()) || k.contains(c.as_str()))
        })
        .count()
}

/// Pick the activities to put into the prompt
///
/// Blank entries are dropped. With an individual activity the shared ones are
/// ordered by descending relevance (ties keep input order); the list is then
/// capped by [`max_activities`].
pub fn select_activities(
    activities: &[String],
    individual_activity: Option<&str>,
    target_chars: usize,
) -> Vec<String> {
    let mut selected: Vec<String> = activities
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(individual) = individual_activity.map(str::trim).filter(|s| !s.is_empty()) {
        selected.sort_by_cached_key(|a| std::cmp::Reverse(relevance_score(a, individual)));
    }

    if let Some(max) = max_activities(target_chars) {
        selected.truncate(max);
    }

    selected
}
