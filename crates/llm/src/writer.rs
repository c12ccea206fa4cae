use saenggibu_common::{Result, SaenggibuError};
use saenggibu_text::{compute_prompt_budget, select_activities, ComplianceTruncator, TextLength};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::llm_trait::TextGenerator;
use crate::prompts::{record_prompt, Grade, RecordKind, RecordPrompt, SchoolLevel, Season};
use crate::types::GenerationRequest;

/// One record to write
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRequest {
    #[serde(default)]
    pub kind: RecordKind,

    #[serde(default)]
    pub school_level: SchoolLevel,

    /// Subject, program or club name
    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub grade: Option<Grade>,

    #[serde(default)]
    pub season: Season,

    /// Bullet-point activity notes
    #[serde(default)]
    pub notes: Vec<String>,

    /// The student's own activity, emphasized in the prompt
    #[serde(default)]
    pub individual_activity: Option<String>,

    #[serde(default)]
    pub text_length: TextLength,

    #[serde(default)]
    pub additional_instructions: Option<String>,
}

/// Final, ceiling-compliant record text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenRecord {
    pub text: String,
    pub char_count: usize,
    pub ceiling: usize,
    pub prompt_target: usize,
    /// Whether the text ends on a recognized complete sentence
    pub complete: bool,
    /// Generations spent on this record
    pub attempts: u32,
}

/// Per-student overrides in a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentInput {
    pub id: String,

    #[serde(default)]
    pub individual_activity: Option<String>,

    #[serde(default)]
    pub grade: Option<Grade>,
}

/// Result for one student of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<WrittenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generates records and enforces the length ceiling on the model output
#[derive(Clone)]
pub struct RecordWriter {
    generator: Arc<dyn TextGenerator>,
    truncator: ComplianceTruncator,
    max_attempts: u32,
}

impl RecordWriter {
    /// Create new writer
    pub fn new(generator: Arc<dyn TextGenerator>, max_attempts: u32) -> Self {
        Self {
            generator,
            truncator: ComplianceTruncator::default(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Use a custom truncator (e.g. extended sentence endings)
    pub fn with_truncator(mut self, truncator: ComplianceTruncator) -> Self {
        self.truncator = truncator;
        self
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Build the generation request for a record
    pub fn build_request(&self, request: &RecordRequest) -> Result<GenerationRequest> {
        let target_chars = request.text_length.target_chars();
        let activities = select_activities(
            &request.notes,
            request.individual_activity.as_deref(),
            target_chars,
        );

        if activities.is_empty() {
            return Err(SaenggibuError::invalid_input("활동 내용을 하나 이상 입력하세요"));
        }

        let prompt = record_prompt(&RecordPrompt {
            kind: request.kind,
            school_level: request.school_level,
            subject: request.subject.as_deref(),
            grade: request.grade,
            season: request.season,
            activities: &activities,
            individual_activity: request.individual_activity.as_deref(),
            target_chars,
        });

        Ok(GenerationRequest::new(prompt)
            .with_instructions(request.additional_instructions.clone()))
    }

    /// Generate one record
    ///
    /// The output is regenerated when the compliant text comes back empty or
    /// without a complete sentence ending, up to the configured attempts. The
    /// last non-empty result wins.
    pub async fn write(&self, request: &RecordRequest) -> Result<WrittenRecord> {
        let target_chars = request.text_length.target_chars();
        let budget = compute_prompt_budget(target_chars);
        let generation = self.build_request(request)?;

        info!(
            "Writing {} - ceiling: {}, prompt target: {}, model: {}",
            request.kind.label(),
            budget.ceiling,
            budget.prompt_target,
            self.generator.model()
        );

        let mut best: Option<(String, u32)> = None;

        for attempt in 1..=self.max_attempts {
            let raw = match self.generator.generate(&generation).await {
                Ok(raw) => raw,
                Err(e @ SaenggibuError::EmptyResponse(_)) => {
                    warn!("Attempt {}/{}: {}", attempt, self.max_attempts, e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let text = self.truncator.enforce(&raw, target_chars);
            debug!(
                "Attempt {}: raw {} chars -> compliant {} chars",
                attempt,
                raw.chars().count(),
                text.chars().count()
            );

            if text.is_empty() {
                warn!("Attempt {}/{}: nothing usable after post-processing", attempt, self.max_attempts);
                continue;
            }

            let complete = self.truncator.endings().is_complete(&text);
            best = Some((text, attempt));
            if complete {
                break;
            }
            warn!(
                "Attempt {}/{}: text does not end on a complete sentence",
                attempt, self.max_attempts
            );
        }

        let (text, attempts) = best.ok_or_else(|| {
            SaenggibuError::empty_response(format!("{} attempts produced no text", self.max_attempts))
        })?;

        Ok(WrittenRecord {
            char_count: text.chars().count(),
            complete: self.truncator.endings().is_complete(&text),
            ceiling: budget.ceiling,
            prompt_target: budget.prompt_target,
            attempts,
            text,
        })
    }

    /// Generate records for several students, one after another
    ///
    /// A failing student does not stop the batch.
    pub async fn write_batch(
        &self,
        base: &RecordRequest,
        students: &[StudentInput],
    ) -> Vec<BatchOutcome> {
        let mut outcomes = Vec::with_capacity(students.len());

        for (i, student) in students.iter().enumerate() {
            debug!("Writing record {}/{} (student {})", i + 1, students.len(), student.id);

            let mut request = base.clone();
            if student.individual_activity.is_some() {
                request.individual_activity = student.individual_activity.clone();
            }
            if student.grade.is_some() {
                request.grade = student.grade;
            }

            let outcome = match self.write(&request).await {
                Ok(record) => BatchOutcome {
                    id: student.id.clone(),
                    record: Some(record),
                    error: None,
                },
                Err(e) => {
                    warn!("Student {} failed: {}", student.id, e);
                    BatchOutcome {
                        id: student.id.clone(),
                        record: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}
