//! CLI command implementations.

mod ask;
mod chunk;
mod config;
mod fetch;
mod search;

pub use ask::run_ask;
pub use chunk::run_chunk;
pub use config::run_config;
pub use fetch::run_fetch;
pub use search::run_search;

use crate::cli::Output;
use crate::config::Settings;
use crate::document::Document;
use crate::video_source::{detect_source, VideoMetadata};
use anyhow::{anyhow, Result};

/// Resolve the input to videos, announcing what was loaded.
async fn load_videos(input: &str, settings: &Settings) -> Result<Vec<VideoMetadata>> {
    let source = detect_source(input, settings.youtube.resolve_api_key())?
        .ok_or_else(|| anyhow!("Not a YouTube URL, video ID, or JSON file: {}", input))?;

    let spinner = Output::spinner(&format!("Loading from {}...", source.name()));
    let videos = source.fetch_videos(input).await;
    spinner.finish_and_clear();

    let videos = videos?;
    for video in &videos {
        Output::video_info(video);
    }
    Ok(videos)
}

async fn load_documents(input: &str, settings: &Settings) -> Result<Vec<Document>> {
    let videos = load_videos(input, settings).await?;
    Ok(videos.iter().map(VideoMetadata::to_document).collect())
}
