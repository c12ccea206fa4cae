use crate::error::SaenggibuError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Saenggibu application configuration
///
/// Passed explicitly to the LLM client and the server instead of living in
/// module-level constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// OpenAI-compatible LLM API base URL (without `/v1/...`)
    pub llm_base_url: String,

    /// API key sent as `x-api-key`
    #[serde(skip_serializing)]
    pub llm_api_key: Option<String>,

    /// Chat model name
    pub llm_model: String,

    /// Sampling temperature
    pub llm_temperature: f32,

    /// Upstream request timeout in seconds
    pub llm_timeout_secs: u64,

    /// How many times a record is generated before giving up on a complete sentence
    pub generation_attempts: u32,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_base_url: "http://localhost:11434".to_string(),
            llm_api_key: None,
            llm_model: "llama3.1:8b".to_string(),
            llm_temperature: 0.7,
            llm_timeout_secs: 120,
            generation_attempts: 2,
            server_host: "0.0.0.0".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, SaenggibuError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SaenggibuError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            llm_base_url: lookup("LLM_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.llm_base_url),
            llm_api_key: lookup("LLM_API_KEY").filter(|key| !key.trim().is_empty()),
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: Self::parse_or("LLM_TEMPERATURE", &lookup, defaults.llm_temperature)?,
            llm_timeout_secs: Self::parse_or("LLM_TIMEOUT_SECS", &lookup, defaults.llm_timeout_secs)?,
            generation_attempts: Self::parse_or(
                "GENERATION_ATTEMPTS",
                &lookup,
                defaults.generation_attempts,
            )?,
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::parse_or("SERVER_PORT", &lookup, defaults.server_port)?,
            log_dir: lookup("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse an optional variable, failing loudly on malformed values
    fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, SaenggibuError>
    where
        T: std::str::FromStr,
        F: Fn(&str) -> Option<String>,
    {
        match lookup(key) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                SaenggibuError::config(format!("Invalid value for {}: {}", key, raw))
            }),
            None => Ok(default),
        }
    }

    /// Chat completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.llm_base_url)
    }

    /// Get log file path
    pub fn get_log_path(&self, filename: &str) -> PathBuf {
        self.log_dir.join(filename)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SaenggibuError> {
        if !self.llm_base_url.starts_with("http://") && !self.llm_base_url.starts_with("https://")
        {
            return Err(SaenggibuError::config(
                "LLM_API_URL must start with http:// or https://",
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(SaenggibuError::config("LLM model name cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(SaenggibuError::config("LLM temperature must be within 0.0-2.0"));
        }

        if self.generation_attempts == 0 {
            return Err(SaenggibuError::config("Generation attempts must be at least 1"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(SaenggibuError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
