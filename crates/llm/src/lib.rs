//! Saenggibu LLM Integration
//!
//! OpenAI-compatible chat client, prompt templates and the record writer
//! that runs model output through the compliance post-processor

mod client;
mod llm_trait;
mod prompts;
mod sse;
mod types;
mod writer;

pub use client::ChatClient;
pub use llm_trait::TextGenerator;
pub use prompts::{
    character_guideline, record_prompt, system_message, Grade, RecordKind, RecordPrompt,
    SchoolLevel, Season, NO_META_TRAILER, SYSTEM_PROMPT,
};
pub use sse::{collect_sse_text, SseAccumulator};
pub use types::{ChatChunk, ChatMessage, ChatRequest, GenerationRequest, Role};
pub use writer::{BatchOutcome, RecordRequest, RecordWriter, StudentInput, WrittenRecord};
