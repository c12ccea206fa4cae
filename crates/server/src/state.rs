use saenggibu_common::{AppConfig, Result};
use saenggibu_llm::{ChatClient, RecordWriter, TextGenerator};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Record writer (owns the text generator)
    pub writer: RecordWriter,
}

impl AppState {
    /// Create state backed by the configured chat endpoint
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = ChatClient::new(&config)?;
        Ok(Self::with_generator(config, Arc::new(client)))
    }

    /// Create state with an explicit generator
    pub fn with_generator(config: AppConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let writer = RecordWriter::new(generator, config.generation_attempts);
        Self { config, writer }
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        self.writer.generator()
    }
}
