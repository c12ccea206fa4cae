use chrono::{DateTime, Utc};
use saenggibu_llm::{
    BatchOutcome, Grade, RecordKind, RecordRequest, SchoolLevel, Season, StudentInput,
};
use saenggibu_text::TextLength;
use serde::{Deserialize, Serialize};

/// Raw generation request (`/api/generate`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    /// User prompt
    pub prompt: String,

    /// Extra system instructions
    #[serde(default)]
    pub additional_instructions: Option<String>,
}

/// Raw generation response
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}

/// Error body shared by all routes
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Record generation request (`/api/records`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordBody {
    #[serde(default)]
    pub kind: RecordKind,

    #[serde(default)]
    pub school_level: SchoolLevel,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub grade: Option<Grade>,

    #[serde(default)]
    pub season: Season,

    #[serde(default)]
    pub notes: Vec<String>,

    #[serde(default)]
    pub individual_activity: Option<String>,

    /// Size selector: "1500", "1000", "600" or "manual"
    #[serde(default)]
    pub text_length: Option<String>,

    /// Character count when `text_length` is "manual" (number or string)
    #[serde(default)]
    pub manual_length: Option<serde_json::Value>,

    #[serde(default)]
    pub additional_instructions: Option<String>,
}

impl RecordBody {
    /// Resolve the size selector
    pub fn text_length(&self) -> TextLength {
        let manual = self.manual_length.as_ref().map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        TextLength::parse(self.text_length.as_deref().unwrap_or("1500"), manual.as_deref())
    }

    pub fn into_request(self) -> RecordRequest {
        let text_length = self.text_length();
        RecordRequest {
            kind: self.kind,
            school_level: self.school_level,
            subject: self.subject,
            grade: self.grade,
            season: self.season,
            notes: self.notes,
            individual_activity: self.individual_activity,
            text_length,
            additional_instructions: self.additional_instructions,
        }
    }
}

/// Batch generation request (`/api/records/batch`)
#[derive(Debug, Deserialize)]
pub struct BatchBody {
    #[serde(flatten)]
    pub record: RecordBody,

    pub students: Vec<StudentInput>,
}

/// Batch generation response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_id: String,
    pub results: Vec<BatchOutcome>,
}

/// Post-processing request (`/api/compliance`)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceBody {
    pub text: String,
    pub target_chars: usize,
}

/// Post-processing response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceResponse {
    pub text: String,
    pub char_count: usize,
    pub ceiling: usize,
    pub complete: bool,
}

/// Budget query (`/api/budget?chars=N`)
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    pub chars: usize,
}

/// Budget response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub ceiling: usize,
    pub prompt_target: usize,
    pub buffer_ratio: f64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    /// Configured LLM base URL
    pub endpoint: String,
    /// Whether the LLM endpoint answered
    pub llm: bool,
    pub time: DateTime<Utc>,
}
