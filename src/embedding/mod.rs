//! Embedding generation for semantic search and retrieval.

mod hashing;
mod ollama;
mod openai;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAIEmbedder;

use crate::config::{EmbeddingProvider, EmbeddingSettings};
use crate::error::{RagytError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
///
/// Implementations are deterministic for a fixed model and must fail with
/// [`RagytError::EmbeddingUnavailable`] rather than return placeholder vectors.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Create the embedder selected by the settings.
pub fn create_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    let dimensions = settings.dimensions as usize;
    if dimensions == 0 {
        return Err(RagytError::Config("embedding dimensions must be positive".to_string()));
    }

    let embedder: Arc<dyn Embedder> = match settings.provider {
        EmbeddingProvider::OpenAI => Arc::new(OpenAIEmbedder::with_config(&settings.model, dimensions)?),
        EmbeddingProvider::Ollama => Arc::new(OllamaEmbedder::with_config(
            &settings.base_url,
            &settings.model,
            dimensions,
        )?),
        EmbeddingProvider::Hashing => Arc::new(HashingEmbedder::new(dimensions)),
    };

    Ok(embedder)
}

/// Fail unless a backend returned exactly one vector per input.
pub(crate) fn ensure_batch_len(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(RagytError::EmbeddingUnavailable(format!(
            "expected {} embeddings, backend returned {}",
            expected, got
        )));
    }
    Ok(())
}
