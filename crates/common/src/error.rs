/// Saenggibu error types
#[derive(Debug, thiserror::Error)]
pub enum SaenggibuError {
    /// Upstream LLM returned an error status or malformed data
    #[error("LLM error: {0}")]
    Llm(String),

    /// The model produced nothing usable
    #[error("AI 응답이 비어있습니다: {0}")]
    EmptyResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SaenggibuError {
    /// Create LLM error
    pub fn llm<S: Into<String>>(msg: S) -> Self {
        Self::Llm(msg.into())
    }

    /// Create empty response error
    pub fn empty_response<S: Into<String>>(msg: S) -> Self {
        Self::EmptyResponse(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether resending the same request may succeed
    ///
    /// Only transport failures count. Empty responses are regenerated by the
    /// record writer instead.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

// HTTP response conversion
impl SaenggibuError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Json(_) => 400,
            Self::Llm(_) => 502,
            Self::EmptyResponse(_) => 502,
            Self::Network(_) => 503,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Io(_) => 500,
            Self::Other(_) => 500,
        }
    }
}
