use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use saenggibu_common::{AppConfig, Result, SaenggibuError};
use tracing::{debug, info, warn};

use crate::llm_trait::TextGenerator;
use crate::prompts::system_message;
use crate::sse::SseAccumulator;
use crate::types::{ChatMessage, ChatRequest, GenerationRequest};

const API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI-compatible chat completions client (Ollama `/v1` endpoint)
#[derive(Debug, Clone)]
pub struct ChatClient {
    base_url: String,
    chat_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_retries: u32,
    client: Client,
}

impl ChatClient {
    /// Create new client from application configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.llm_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            "LLM client initialized: {} (model: {})",
            config.llm_base_url, config.llm_model
        );

        Ok(Self {
            base_url: config.llm_base_url.clone(),
            chat_url: config.chat_completions_url(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
            temperature: config.llm_temperature,
            max_retries: DEFAULT_MAX_RETRIES,
            client,
        })
    }

    /// Override the number of attempts for transient failures
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Build the chat payload for a generation request
    pub fn build_request(&self, request: &GenerationRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_message(request.additional_instructions.as_deref())),
                ChatMessage::user(request.prompt.clone()),
            ],
            temperature: Some(self.temperature),
            stream: true,
        }
    }

    /// Generate with retry on transient failures
    async fn generate_with_retry(&self, request: &ChatRequest) -> Result<String> {
        debug!(
            "Sending chat request - Model: {}, Prompt length: {} chars",
            request.model,
            request
                .messages
                .iter()
                .map(|m| m.content.chars().count())
                .sum::<usize>()
        );

        let mut attempt = 1;
        loop {
            match self.try_generate(request).await {
                Ok(text) => {
                    debug!("Received response - Length: {} chars", text.chars().count());
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                    warn!(
                        "LLM request failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Single attempt: send the request and reassemble the event stream
    async fn try_generate(&self, request: &ChatRequest) -> Result<String> {
        let mut builder = self.client.post(&self.chat_url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SaenggibuError::network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SaenggibuError::llm(format!(
                "LLM API 오류 ({}): {}",
                status.as_u16(),
                body
            )));
        }

        let mut acc = SseAccumulator::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| SaenggibuError::network(format!("Stream interrupted: {}", e)))?;
            acc.push(&chunk);
            if acc.is_done() {
                break;
            }
        }

        let text = acc.finish();
        if text.trim().is_empty() {
            return Err(SaenggibuError::empty_response("Empty response from LLM"));
        }

        Ok(text)
    }

    /// Test connection to the LLM endpoint
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/v1/models", self.base_url);

        let mut builder = self.client.get(&url);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SaenggibuError::network(format!("Failed to connect to LLM: {}", e)))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let chat_request = self.build_request(request);
        self.generate_with_retry(&chat_request).await
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        match self.test_connection().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!("LLM health check failed: {}", e);
                false
            }
        }
    }
}
