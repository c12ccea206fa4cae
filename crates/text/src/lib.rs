//! Saenggibu text core
//!
//! 생성된 생활기록부 문장의 글자수 예산 계산과 후처리:
//! prompt budget planning, meta-info stripping, sentence boundaries and
//! ceiling-compliant truncation. Everything here is pure and synchronous.

pub mod budget;
pub mod compliance;
pub mod meta;
pub mod plan;
pub mod sentence;

pub use budget::{buffer_ratio, clamp_ceiling, compute_prompt_budget, PromptBudget, ABSOLUTE_MAX};
pub use compliance::{enforce_compliance, ComplianceTruncator};
pub use meta::strip_meta;
pub use plan::{max_activities, relevance_score, select_activities, TextLength};
pub use sentence::{
    ends_with_complete_sentence, split_into_sentences, SentenceEndings, DEFAULT_SENTENCE_ENDINGS,
};
