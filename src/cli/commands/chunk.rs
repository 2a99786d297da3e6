//! Chunk command implementation.

use super::load_documents;
use crate::chunking::{Chunker, ChunkingConfig, WindowChunker};
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the chunk command.
pub async fn run_chunk(input: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chunk, input, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let config = ChunkingConfig::try_from(&settings.chunking)?;
    let chunker = WindowChunker::new(config);
    let documents = load_documents(input, &settings).await?;

    let mut total = 0;
    for document in &documents {
        let chunks = chunker.split(document)?;
        for chunk in &chunks {
            Output::chunk(chunk.order, chunk.char_len(), &chunk.text);
        }
        total += chunks.len();
    }

    println!();
    Output::success(&format!(
        "{} chunk(s) from {} document(s) (size {}, overlap {})",
        total,
        documents.len(),
        config.chunk_size(),
        config.chunk_overlap()
    ));

    Ok(())
}
