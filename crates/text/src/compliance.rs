use tracing::debug;

use crate::budget::clamp_ceiling;
use crate::meta::strip_meta;
use crate::sentence::{split_into_sentences, with_terminal_punctuation, SentenceEndings};

/// Fraction of the ceiling below which only the first sentence is kept
const MIN_CONTENT_RATIO: f64 = 0.5;

/// A `.` found past this fraction of the hard-cut slice is a usable boundary
const PERIOD_CUT_RATIO: f64 = 0.5;

/// A space found past this fraction of the hard-cut slice is a usable boundary
const SPACE_CUT_RATIO: f64 = 0.7;

/// Post-processor that fits raw model output under a character ceiling
/// while ending on a complete sentence
#[derive(Debug, Clone, Default)]
pub struct ComplianceTruncator {
    endings: SentenceEndings,
}

impl ComplianceTruncator {
    /// Create a truncator with a custom sentence-ending set
    pub fn new(endings: SentenceEndings) -> Self {
        Self { endings }
    }

    pub fn endings(&self) -> &SentenceEndings {
        &self.endings
    }

    /// Strip meta info and cut the text to `min(target_chars, ABSOLUTE_MAX)`
    /// characters on a sentence boundary
    ///
    /// Never fails; returns an empty string when nothing usable remains.
    pub fn enforce(&self, raw_text: &str, target_chars: usize) -> String {
        let cleaned = strip_meta(raw_text);
        if cleaned.is_empty() {
            return String::new();
        }

        let ceiling = clamp_ceiling(target_chars);
        if ceiling == 0 {
            return String::new();
        }

        if char_len(&cleaned) <= ceiling && self.endings.is_complete(&cleaned) {
            return cleaned;
        }

        let sentences = split_into_sentences(&cleaned);
        if sentences.is_empty() {
            return if char_len(&cleaned) <= ceiling {
                cleaned
            } else {
                String::new()
            };
        }

        let mut result = accumulate_sentences(&sentences, ceiling);

        // 결과가 너무 짧으면 첫 문장이라도 확보
        if (char_len(&result) as f64) < ceiling as f64 * MIN_CONTENT_RATIO {
            let first = with_terminal_punctuation(sentences[0]);
            if char_len(&first) <= ceiling {
                result = first;
            }
        }

        if result.is_empty() {
            debug!(
                "No sentence fits within {} chars, falling back to hard cut",
                ceiling
            );
            result = self.hard_cut(&cleaned, ceiling);
        }

        result.trim().to_string()
    }

    /// Last resort when not even the first sentence fits
    fn hard_cut(&self, cleaned: &str, ceiling: usize) -> String {
        let truncated: Vec<char> = cleaned.chars().take(ceiling).collect();

        if let Some(pos) = truncated.iter().rposition(|&c| c == '.') {
            if pos as f64 > truncated.len() as f64 * PERIOD_CUT_RATIO {
                return truncated[..=pos].iter().collect();
            }
        }

        // Every remaining path appends '.', so leave room for it
        let room = &truncated[..truncated.len().min(ceiling - 1)];

        if let Some(pos) = room.iter().rposition(|&c| self.endings.contains(c)) {
            debug!("Hard cut at sentence ending (char {})", pos);
            let mut cut: String = room[..=pos].iter().collect();
            cut.push('.');
            return cut;
        }

        let head: String = match room.iter().rposition(|&c| c == ' ') {
            Some(pos) if pos as f64 > room.len() as f64 * SPACE_CUT_RATIO => {
                room[..pos].iter().collect()
            }
            _ => room.iter().collect(),
        };

        // The appended period is not backed by a recognized ending here
        debug!("Hard cut without sentence ending");
        let mut cut = head
            .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
            .to_string();
        cut.push('.');
        cut
    }
}

/// Greedy strict-prefix accumulation: sentences are added in order until the
/// next one would overflow, then accumulation stops
fn accumulate_sentences(sentences: &[&str], ceiling: usize) -> String {
    let mut result = String::new();

    for sentence in sentences {
        let complete = with_terminal_punctuation(sentence);
        let candidate = if result.is_empty() {
            complete
        } else {
            format!("{} {}", result, complete)
        };

        if char_len(&candidate) <= ceiling {
            result = candidate;
        } else {
            break;
        }
    }

    result
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Enforce the length ceiling with the default sentence-ending set
///
/// See [`ComplianceTruncator::enforce`].
pub fn enforce_compliance(raw_text: &str, target_chars: usize) -> String {
    ComplianceTruncator::default().enforce(raw_text, target_chars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::ABSOLUTE_MAX;
    use crate::sentence::ends_with_complete_sentence;

    const THREE_SENTENCES: &str =
        "첫 문장임. 두 번째 문장임. 세 번째로 아주 길게 이어지는 문장이 초과해서 잘릴 것임.";

    #[test]
    fn test_empty_input() {
        assert_eq!(enforce_compliance("", 500), "");
        assert_eq!(enforce_compliance("   \n", 500), "");
        assert_eq!(enforce_compliance("(약 500자)", 500), "");
    }

    #[test]
    fn test_fast_path_returns_cleaned() {
        let text = "  과학 탐구 동아리에서 실험을 주도함. 결과를 발표함.  ";
        assert_eq!(
            enforce_compliance(text, 500),
            "과학 탐구 동아리에서 실험을 주도함. 결과를 발표함."
        );
    }

    #[test]
    fn test_meta_removed_before_check() {
        let text = "실험을 주도함. 결과를 발표함.(약 330자)";
        assert_eq!(enforce_compliance(text, 330), "실험을 주도함. 결과를 발표함.");
    }

    #[test]
    fn test_greedy_stops_at_first_overflow() {
        // 6 + 1 + 9 = 16 chars fit in 20; the third sentence does not
        assert_eq!(
            enforce_compliance(THREE_SENTENCES, 20),
            "첫 문장임. 두 번째 문장임."
        );
        // only the first sentence fits in 10
        assert_eq!(enforce_compliance(THREE_SENTENCES, 10), "첫 문장임.");
    }

    #[test]
    fn test_greedy_does_not_skip_ahead() {
        // the short third sentence would fit but must not be picked after an overflow
        let text = "가나다라마바사 아자차카타파하 진행함. 아주 긴 두 번째 문장이 여기에서 넘침. 짧음.";
        let out = enforce_compliance(text, 30);
        assert_eq!(out, "가나다라마바사 아자차카타파하 진행함.");
    }

    #[test]
    fn test_missing_period_is_appended() {
        let text = "활동에 성실히 참여함. 친구들과 협력함";
        assert_eq!(
            enforce_compliance(text, 30),
            "활동에 성실히 참여함. 친구들과 협력함."
        );
    }

    #[test]
    fn test_min_content_guard_keeps_first_sentence() {
        // "A. B" is not complete, accumulation gives "A. B." which is short,
        // so the guard narrows it to the first sentence
        let text = "참여함. 협력함";
        assert_eq!(enforce_compliance(text, 500), "참여함.");
    }

    #[test]
    fn test_hard_cut_at_period() {
        // single oversized sentence with an inner period past the half mark
        let text = "가나다라마바사아자.차카타파하 계속 이어지는 문장";
        let out = enforce_compliance(text, 12);
        assert_eq!(out, "가나다라마바사아자.");
    }

    #[test]
    fn test_hard_cut_at_sentence_ending() {
        let text = "활동을 마치고 소감을 발표함 그리고 끝없이 이어지는 설명 문장";
        let out = enforce_compliance(text, 20);
        assert_eq!(out, "활동을 마치고 소감을 발표함.");
        assert!(ends_with_complete_sentence(&out));
    }

    #[test]
    fn test_hard_cut_at_space() {
        let text = "abcdefgh ijklmnop, qrstuvwxyz";
        // room = "abcdefgh ijklmnop, q" (20 chars), last space at 18 > 14
        let out = enforce_compliance(text, 21);
        assert_eq!(out, "abcdefgh ijklmnop.");
    }

    #[test]
    fn test_no_punctuation_over_ceiling() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let out = enforce_compliance(text, 10);
        assert_eq!(out, "abcdefghi.");
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn test_target_clamped_to_absolute_max() {
        let sentence = "꾸준히 노력하여 성장함. ";
        let text = sentence.repeat(100);
        let out = enforce_compliance(&text, 2000);
        assert!(out.chars().count() <= ABSOLUTE_MAX);
        assert!(ends_with_complete_sentence(&out));
    }

    #[test]
    fn test_zero_target() {
        assert_eq!(enforce_compliance("참여함.", 0), "");
    }

    #[test]
    fn test_ceiling_invariant() {
        let inputs = [
            THREE_SENTENCES,
            "abcdefghijklmnopqrstuvwxyz",
            "가나다라마바사아자차카타파하,,,   ",
            "문장임.문장임.문장임.문장임.",
            "아주 긴 문장이지만 마침표가 전혀 없고 종결어미도 없이 계속 이어지는 텍스트",
            "짧음.",
        ];
        for input in inputs {
            for target in 1..=60 {
                let out = enforce_compliance(input, target);
                assert!(
                    out.chars().count() <= target,
                    "{:?} at {} -> {:?}",
                    input,
                    target,
                    out
                );
                if let Some(last) = out.chars().last() {
                    assert!(crate::sentence::is_terminal(last), "{:?}", out);
                }
            }
        }
    }

    #[test]
    fn test_idempotent_on_compliant_output() {
        for target in [20, 50, 200, 500] {
            let first = enforce_compliance(THREE_SENTENCES, target);
            assert!(ends_with_complete_sentence(&first));
            assert_eq!(enforce_compliance(&first, target), first);
        }
    }

    #[test]
    fn test_custom_endings_in_hard_cut() {
        let truncator = ComplianceTruncator::new(SentenceEndings::new(['져']));
        let out = truncator.enforce("마음이 따뜻해져 그리고 이어지는 긴 이야기", 12);
        assert_eq!(out, "마음이 따뜻해져.");
    }
}
