//! Configuration module for ragyt.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AgentPrompts, Prompts};
pub use settings::{
    AgentSettings, ChunkingSettings, EmbeddingProvider, EmbeddingSettings, GeneralSettings,
    LlmSettings, PromptSettings, RetrievalSettings, Settings, YoutubeSettings,
};
