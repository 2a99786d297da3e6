//! In-memory vector index for ragyt.
//!
//! Entries are kept in insertion order and searched exhaustively by cosine
//! similarity. The index lives only as long as the value that owns it.

mod memory;

pub use memory::MemoryVectorStore;

use crate::chunking::Chunk;
use crate::document::MetadataValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An embedded chunk stored in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Unique entry ID. Duplicate chunks get distinct IDs.
    pub id: Uuid,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// The chunk this embedding represents.
    pub chunk: Chunk,
}

impl IndexEntry {
    pub fn new(embedding: Vec<f32>, chunk: Chunk) -> Self {
        Self {
            id: Uuid::new_v4(),
            embedding,
            chunk,
        }
    }

    pub fn text(&self) -> &str {
        &self.chunk.text
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched entry.
    pub entry: IndexEntry,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Options for a similarity search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of results. Must be positive.
    pub k: usize,
    /// Drop results scoring below this value.
    pub min_score: Option<f32>,
    /// Only consider entries whose metadata has this key/value.
    pub filter: Option<(String, MetadataValue)>,
}

impl SearchOptions {
    pub fn top_k(k: usize) -> Self {
        Self {
            k,
            min_score: None,
            filter: None,
        }
    }

    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn with_filter(mut self, key: &str, value: impl Into<MetadataValue>) -> Self {
        self.filter = Some((key.to_string(), value.into()));
        self
    }

    fn admits(&self, entry: &IndexEntry) -> bool {
        match &self.filter {
            Some((key, value)) => entry.chunk.metadata.get(key) == Some(value),
            None => true,
        }
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
