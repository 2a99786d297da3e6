//! Flat in-memory vector store.

use super::{cosine_similarity, IndexEntry, SearchOptions, SearchResult};
use crate::chunking::Chunk;
use crate::embedding::{ensure_batch_len, Embedder};
use crate::error::{RagytError, Result};
use std::sync::Arc;
use tracing::{debug, instrument};

/// In-memory vector store.
///
/// Written through `&mut self` while building, then shared read-only
/// (typically behind an `Arc`) while answering queries.
pub struct MemoryVectorStore {
    embedder: Arc<dyn Embedder>,
    entries: Vec<IndexEntry>,
}

impl MemoryVectorStore {
    /// Create an empty store whose entries must match the embedder's dimensions.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
        }
    }

    /// Dimension every stored embedding must have.
    pub fn dimensions(&self) -> usize {
        self.embedder.dimensions()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in insertion order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Append entries. Either all are added or, on a dimension mismatch, none.
    pub fn add(&mut self, entries: Vec<IndexEntry>) -> Result<usize> {
        let expected = self.dimensions();
        if let Some(bad) = entries.iter().find(|e| e.embedding.len() != expected) {
            return Err(RagytError::Config(format!(
                "embedding dimension mismatch: index expects {}, entry {} has {}",
                expected,
                bad.id,
                bad.embedding.len()
            )));
        }

        let count = entries.len();
        self.entries.extend(entries);
        debug!("Added {} entries ({} total)", count, self.entries.len());
        Ok(count)
    }

    /// Embed chunks in one batch and add them.
    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn index_chunks(&mut self, chunks: Vec<Chunk>) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        ensure_batch_len(chunks.len(), embeddings.len())?;

        let entries = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| IndexEntry::new(embedding, chunk))
            .collect();

        self.add(entries)
    }

    /// Top-`k` entries most similar to `query`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>> {
        self.search_with(query, &SearchOptions::top_k(k)).await
    }

    /// Search with a score threshold and/or metadata filter.
    #[instrument(skip(self, options), fields(k = options.k))]
    pub async fn search_with(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        if options.k == 0 {
            return Err(RagytError::InvalidInput("k must be a positive integer".to_string()));
        }
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        self.search_by_embedding(&query_embedding, options)
    }

    /// Rank stored entries against a precomputed query vector.
    pub fn search_by_embedding(
        &self,
        query_embedding: &[f32],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>> {
        if options.k == 0 {
            return Err(RagytError::InvalidInput("k must be a positive integer".to_string()));
        }
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        if query_embedding.len() != self.dimensions() {
            return Err(RagytError::Config(format!(
                "query embedding has {} dimensions, index expects {}",
                query_embedding.len(),
                self.dimensions()
            )));
        }

        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .filter(|entry| options.admits(entry))
            .map(|entry| (cosine_similarity(query_embedding, &entry.embedding), entry))
            .filter(|(score, _)| options.min_score.map_or(true, |min| *score >= min))
            .collect();

        // Stable sort: equal scores keep insertion order.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(options.k);

        Ok(scored
            .into_iter()
            .map(|(score, entry)| SearchResult {
                entry: entry.clone(),
                score,
            })
            .collect())
    }
}
