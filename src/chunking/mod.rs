//! Text chunking for breaking documents into overlapping, searchable windows.

mod window;

pub use window::WindowChunker;

use crate::document::{Document, Metadata};
use crate::error::{RagytError, Result};
use serde::{Deserialize, Serialize};

/// A bounded slice of a document's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// Metadata inherited from the parent document.
    pub metadata: Metadata,
    /// Position of this chunk among its siblings.
    pub order: usize,
}

impl Chunk {
    pub fn new(text: String, metadata: Metadata, order: usize) -> Self {
        Self { text, metadata, order }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Validated chunk window configuration, measured in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkingConfig {
    /// Fails unless `chunk_size > 0` and `chunk_overlap < chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagytError::Config("chunk size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagytError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Distance between the starts of consecutive windows. Always positive.
    pub fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl TryFrom<&crate::config::ChunkingSettings> for ChunkingConfig {
    type Error = RagytError;

    fn try_from(settings: &crate::config::ChunkingSettings) -> Result<Self> {
        Self::new(settings.chunk_size, settings.chunk_overlap)
    }
}

/// Trait for chunking implementations.
pub trait Chunker: Send + Sync {
    /// Split a document into ordered chunks.
    fn split(&self, document: &Document) -> Result<Vec<Chunk>>;
}

/// Split a document with a sliding character window.
pub fn split(document: &Document, chunk_size: usize, chunk_overlap: usize) -> Result<Vec<Chunk>> {
    let config = ChunkingConfig::new(chunk_size, chunk_overlap)?;
    WindowChunker::new(config).split(document)
}
