//! Exported JSON file source.

use super::{VideoMetadata, VideoSource};
use crate::error::{RagytError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Export files hold an array of videos; a single scraped object is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Many(Vec<VideoMetadata>),
    One(Box<VideoMetadata>),
}

/// Reads videos from a JSON file written by `ragyt fetch -o`.
#[derive(Debug, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    fn is_json_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl VideoSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn can_handle(&self, input: &str) -> bool {
        let path = Path::new(input);
        Self::is_json_file(path) && path.is_file()
    }

    async fn fetch_videos(&self, input: &str) -> Result<Vec<VideoMetadata>> {
        let content = tokio::fs::read_to_string(input).await?;
        let videos = match serde_json::from_str(&content)
            .map_err(|e| RagytError::VideoSource(format!("Invalid video file {}: {}", input, e)))?
        {
            Export::Many(videos) => videos,
            Export::One(video) => vec![*video],
        };

        info!("Loaded {} video(s) from {}", videos.len(), input);
        Ok(videos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VIDEO: &str = r#"{"title": "T", "youtuber": "Y", "description": "D", "video_id": "abcdefghijk"}"#;

    #[tokio::test]
    async fn test_reads_array_and_single_object() {
        let dir = TempDir::new().unwrap();
        let many = dir.path().join("many.json");
        let one = dir.path().join("one.json");
        std::fs::write(&many, format!("[{}, {}]", VIDEO, VIDEO)).unwrap();
        std::fs::write(&one, VIDEO).unwrap();

        let source = FileSource::new();
        let videos = source.fetch_videos(many.to_str().unwrap()).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].description, "D");
        assert_eq!(videos[0].like_count, 0);

        let videos = source.fetch_videos(one.to_str().unwrap()).await.unwrap();
        assert_eq!(videos.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"title\": 1}").unwrap();

        let err = FileSource::new().fetch_videos(path.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, RagytError::VideoSource(_)));
    }

    #[test]
    fn test_can_handle_existing_json_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, "[]").unwrap();

        let source = FileSource::new();
        assert!(source.can_handle(path.to_str().unwrap()));
        assert!(!source.can_handle(dir.path().join("missing.json").to_str().unwrap()));
        assert!(!source.can_handle("dQw4w9WgXcQ"));
    }
}
