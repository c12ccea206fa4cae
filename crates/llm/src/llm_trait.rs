use async_trait::async_trait;
use saenggibu_common::Result;

use crate::types::GenerationRequest;

/// Anything that turns a prompt into raw model text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate the complete raw text for a request
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Model name used for generation
    fn model(&self) -> &str;

    /// Whether the backing model endpoint is reachable
    async fn is_available(&self) -> bool {
        true
    }
}
