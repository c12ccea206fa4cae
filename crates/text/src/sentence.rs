use serde::{Deserialize, Serialize};

/// Sentence-final punctuation
pub const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?'];

/// Nominalized/declarative endings the prompts ask for:
/// ~함, ~음, ~임, ~됨, ~봄, ~옴, ... plus plain ~다/~요 and question ~까/~니
pub const DEFAULT_SENTENCE_ENDINGS: &[char] = &[
    '함', '음', '임', '됨', '봄', '옴', '줌', '춤', '움', '늠', '름', '다', '요', '까', '니',
];

/// Closed set of characters that may end a complete Korean sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceEndings {
    chars: Vec<char>,
}

impl Default for SentenceEndings {
    fn default() -> Self {
        Self {
            chars: DEFAULT_SENTENCE_ENDINGS.to_vec(),
        }
    }
}

impl SentenceEndings {
    /// Create an ending set from an explicit list of characters
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut set = Self { chars: Vec::new() };
        set.extend(chars);
        set
    }

    /// Extend the default set with additional endings
    pub fn with_extra(extra: impl IntoIterator<Item = char>) -> Self {
        let mut set = Self::default();
        set.extend(extra);
        set
    }

    fn extend(&mut self, chars: impl IntoIterator<Item = char>) {
        for c in chars {
            if !self.contains(c) {
                self.chars.push(c);
            }
        }
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Whether the trimmed text ends with an ending character directly
    /// followed by terminal punctuation
    pub fn is_complete(&self, text: &str) -> bool {
        let mut tail = text.trim().chars().rev();
        match (tail.next(), tail.next()) {
            (Some(punct), Some(ending)) => is_terminal(punct) && self.contains(ending),
            _ => false,
        }
    }
}

/// Whether `c` is `.`, `!` or `?`
pub fn is_terminal(c: char) -> bool {
    TERMINAL_PUNCTUATION.contains(&c)
}

/// Check with the default ending set whether text ends on a complete sentence
pub fn ends_with_complete_sentence(text: &str) -> bool {
    SentenceEndings::default().is_complete(text)
}

/// Split text into sentences at whitespace following terminal punctuation
///
/// The punctuation stays attached to the preceding sentence. Fragments that
/// are empty or whitespace-only are dropped.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if c.is_whitespace() && prev.map_or(false, is_terminal) {
            sentences.push(&text[start..idx]);

            // consume the whole whitespace run
            let mut next_start = text.len();
            while let Some(&(j, w)) = chars.peek() {
                if w.is_whitespace() {
                    chars.next();
                } else {
                    next_start = j;
                    break;
                }
            }
            start = next_start;
            prev = None;
            continue;
        }
        prev = Some(c);
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

/// Ensure a sentence ends with terminal punctuation, appending `.` if needed
pub fn with_terminal_punctuation(sentence: &str) -> String {
    let trimmed = sentence.trim();
    if trimmed.ends_with(TERMINAL_PUNCTUATION) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_sentence_endings() {
        assert!(ends_with_complete_sentence("실험 과정을 꼼꼼히 기록함."));
        assert!(ends_with_complete_sentence("리더십이 돋보임!  "));
        assert!(ends_with_complete_sentence("무엇을 배웠을까?"));
        assert!(ends_with_complete_sentence("성장하였다.\n"));
    }

    #[test]
    fn test_incomplete_sentences() {
        assert!(!ends_with_complete_sentence(""));
        assert!(!ends_with_complete_sentence("   "));
        assert!(!ends_with_complete_sentence("."));
        assert!(!ends_with_complete_sentence("실험 과정을 꼼꼼히 기록함"));
        assert!(!ends_with_complete_sentence("발표를 준비하였으며."));
        assert!(!ends_with_complete_sentence("참여함 ."));
        assert!(!ends_with_complete_sentence("It works."));
    }

    #[test]
    fn test_custom_endings() {
        let endings = SentenceEndings::with_extra(['죠']);
        assert!(endings.is_complete("그렇죠."));
        assert!(endings.is_complete("기록함."));
        assert!(!ends_with_complete_sentence("그렇죠."));

        let only_ham = SentenceEndings::new(['함']);
        assert!(only_ham.is_complete("기록함."));
        assert!(!only_ham.is_complete("기록임."));
    }

    #[test]
    fn test_split_keeps_punctuation() {
        let sentences = split_into_sentences("첫 문장임. 두 번째 문장임! 세 번째일까? 끝");
        assert_eq!(sentences, vec!["첫 문장임.", "두 번째 문장임!", "세 번째일까?", "끝"]);
    }

    #[test]
    fn test_split_whitespace_runs() {
        let sentences = split_into_sentences("하나임.  \n\n둘임.\t셋임.");
        assert_eq!(sentences, vec!["하나임.", "둘임.", "셋임."]);
    }

    #[test]
    fn test_split_only_after_punctuation() {
        // decimal points and inner spaces do not split
        let sentences = split_into_sentences("점수가 3.5 향상됨. 다음 목표를 세움.");
        assert_eq!(sentences, vec!["점수가 3.5 향상됨.", "다음 목표를 세움."]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_into_sentences("").is_empty());
        assert!(split_into_sentences("  \n ").is_empty());
    }

    #[test]
    fn test_with_terminal_punctuation() {
        assert_eq!(with_terminal_punctuation(" 참여함 "), "참여함.");
        assert_eq!(with_terminal_punctuation("참여함!"), "참여함!");
        assert_eq!(with_terminal_punctuation("왜일까?"), "왜일까?");
    }
}
