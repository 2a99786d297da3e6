//! Fixed-size sliding window chunking.
//!
//! Windows are `chunk_size` characters long and start `chunk_size - chunk_overlap`
//! characters apart. The tail that fits in one window becomes the last chunk.

use super::{Chunk, Chunker, ChunkingConfig};
use crate::document::Document;
use crate::error::Result;
use tracing::debug;

/// Sliding window chunker.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowChunker {
    config: ChunkingConfig,
}

impl WindowChunker {
    pub fn new(config: ChunkingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ChunkingConfig {
        self.config
    }
}

impl Chunker for WindowChunker {
    fn split(&self, document: &Document) -> Result<Vec<Chunk>> {
        // Byte offset of every char boundary, plus the end of the text.
        let text = document.text();
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_count = boundaries.len();
        boundaries.push(text.len());

        let mut chunks = Vec::new();
        if char_count == 0 {
            return Ok(chunks);
        }

        let size = self.config.chunk_size();
        let step = self.config.step();
        let mut start = 0;

        loop {
            let end = (start + size).min(char_count);
            chunks.push(Chunk::new(
                text[boundaries[start]..boundaries[end]].to_string(),
                document.metadata().clone(),
                chunks.len(),
            ));

            if end == char_count {
                break;
            }
            start += step;
        }

        debug!(
            "Split {} chars into {} chunks (size {}, overlap {})",
            char_count,
            chunks.len(),
            size,
            self.config.chunk_overlap()
        );

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::split;
    use crate::document::Metadata;

    fn text_of(len: usize) -> String {
        // Cycle through letters so windows are distinguishable.
        (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
    }

    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(&chunk.text);
            } else {
                out.extend(chunk.text.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_short_document_is_one_chunk() {
        let mut metadata = Metadata::new();
        metadata.insert("video_id".to_string(), "abc".into());
        let doc = Document::with_metadata("short description", metadata.clone());

        let chunks = split(&doc, 1000, 200).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "short description");
        assert_eq!(chunks[0].metadata, metadata);
    }

    #[test]
    fn test_exact_size_is_one_chunk() {
        let doc = Document::new(text_of(1000));
        let chunks = split(&doc, 1000, 200).unwrap();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_document_yields_nothing() {
        let chunks = split(&Document::new(""), 1000, 200).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_2500_chars_with_default_window() {
        let text = text_of(2500);
        let chunks = split(&Document::new(text.clone()), 1000, 200).unwrap();

        let lens: Vec<usize> = chunks.iter().map(|c| c.char_len()).collect();
        assert_eq!(lens, vec![1000, 1000, 900]);
        assert_eq!(chunks[1].text, text[800..1800]);
        assert_eq!(chunks[2].text, text[1600..]);
        assert_eq!(chunks.iter().map(|c| c.order).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let chunks = split(&Document::new(text_of(3000)), 500, 120).unwrap();
        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().skip(500 - 120).collect();
            let head: String = pair[1].text.chars().take(120).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_reconstruction_across_configs() {
        let text = text_of(1237);
        for (size, overlap) in [(1, 0), (7, 3), (100, 0), (100, 99), (400, 150), (1237, 10), (5000, 4999)] {
            let chunks = split(&Document::new(text.clone()), size, overlap).unwrap();
            assert_eq!(reconstruct(&chunks, overlap), text, "size {} overlap {}", size, overlap);
            assert!(chunks.iter().all(|c| c.char_len() <= size));
        }
    }

    #[test]
    fn test_multibyte_text_is_split_on_char_boundaries() {
        let text = "✨ Want to scrape data like a pro? 🤖 RAG with Langchain 🚀".repeat(5);
        let chunks = split(&Document::new(text.clone()), 40, 10).unwrap();
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.char_len() <= 40));
        assert_eq!(reconstruct(&chunks, 10), text);
    }
}
