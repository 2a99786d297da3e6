//! Error types for ragyt.

use thiserror::Error;

/// Library-level error type for ragyt operations.
#[derive(Error, Debug)]
pub enum RagytError {
    /// Invalid chunk sizes, dimension mismatches, unknown providers. Fatal.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding backend unavailable: {0}")]
    EmbeddingUnavailable(String),

    #[error("LLM backend unavailable: {0}")]
    LlmUnavailable(String),

    #[error("Agent exceeded maximum turns ({max_turns})")]
    AgentExhausted { max_turns: usize },

    /// A tool call that does not match the tool's declared input schema.
    #[error("Tool call rejected: {0}")]
    ToolSchemaMismatch(String),

    #[error("Video source error: {0}")]
    VideoSource(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl RagytError {
    /// Whether the agent loop may report this error back into the conversation
    /// instead of aborting the run.
    pub fn is_recoverable_in_conversation(&self) -> bool {
        matches!(self, RagytError::ToolSchemaMismatch(_))
    }
}

/// Result type alias for ragyt operations.
pub type Result<T> = std::result::Result<T, RagytError>;
