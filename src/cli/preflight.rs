//! Pre-flight checks before expensive operations.
//!
//! Validates that required credentials are configured before starting
//! operations that would otherwise fail midway.

use crate::config::{EmbeddingProvider, Settings};
use crate::error::{RagytError, Result};
use std::path::Path;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching from YouTube requires an API key.
    Fetch,
    /// Chunking only needs the source.
    Chunk,
    /// Search needs the source and the embedding backend.
    Search,
    /// Asking needs everything search needs plus the LLM.
    Ask,
}

/// Run pre-flight checks for the given operation and input.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, input: &str, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Fetch => check_youtube_key(settings)?,
        Operation::Chunk => check_source(input, settings)?,
        Operation::Search => {
            check_source(input, settings)?;
            check_embedding(settings)?;
        }
        Operation::Ask => {
            check_source(input, settings)?;
            check_embedding(settings)?;
            check_llm_key(settings)?;
        }
    }
    Ok(())
}

/// Local export files need no credentials; anything else goes to YouTube.
fn check_source(input: &str, settings: &Settings) -> Result<()> {
    if Path::new(input).is_file() {
        return Ok(());
    }
    check_youtube_key(settings)
}

fn check_youtube_key(settings: &Settings) -> Result<()> {
    match settings.youtube.resolve_api_key() {
        Some(_) => Ok(()),
        None => Err(RagytError::Config(
            "YouTube API key not set. Set youtube.api_key in config or export YOUTUBE_API_KEY='...'"
                .to_string(),
        )),
    }
}

fn check_embedding(settings: &Settings) -> Result<()> {
    if settings.embedding.provider != EmbeddingProvider::OpenAI {
        return Ok(());
    }
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(RagytError::Config(
            "OPENAI_API_KEY not set (required by embedding.provider = \"openai\")".to_string(),
        )),
    }
}

fn check_llm_key(settings: &Settings) -> Result<()> {
    match settings.llm.api_key() {
        Some(_) => Ok(()),
        None => Err(RagytError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            settings.llm.api_key_env, settings.llm.api_key_env
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_chunk_from_file_needs_nothing() {
        let file = NamedTempFile::new().unwrap();
        let settings = Settings::default();
        assert!(check(Operation::Chunk, file.path().to_str().unwrap(), &settings).is_ok());
    }

    #[test]
    fn test_search_with_local_embeddings_from_file() {
        let file = NamedTempFile::new().unwrap();
        let mut settings = Settings::default();
        settings.embedding.provider = EmbeddingProvider::Hashing;
        assert!(check(Operation::Search, file.path().to_str().unwrap(), &settings).is_ok());
    }

    #[test]
    fn test_ask_requires_llm_key() {
        let file = NamedTempFile::new().unwrap();
        let mut settings = Settings::default();
        settings.llm.api_key_env = "RAGYT_TEST_UNSET_LLM_KEY".to_string();
        let err = check(Operation::Ask, file.path().to_str().unwrap(), &settings).unwrap_err();
        assert!(err.to_string().contains("RAGYT_TEST_UNSET_LLM_KEY"));
    }
}
