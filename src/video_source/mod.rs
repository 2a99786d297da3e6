//! Video sources: where the documents to index come from.
//!
//! A source turns user input (a YouTube URL, a bare video ID, or a path to an
//! exported JSON file) into [`VideoMetadata`] records whose description is
//! what gets indexed.

mod file;
mod youtube;

pub use file::FileSource;
pub use youtube::YoutubeSource;

use crate::document::{Document, Metadata, MetadataValue};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VIDEO_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            # Full YouTube URLs
            (?:https?://)?
            (?:www\.)?
            (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)
            ([^&\n?\#]+)
        )
        |
        # Bare video ID (11 characters)
        ^([a-zA-Z0-9_-]{11})$
    ",
    )
    .expect("Invalid regex")
});

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("Invalid regex")
});

/// One scraped video, in the same shape the export files use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    /// Channel title.
    pub youtuber: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    /// Human-readable duration, e.g. `3:31:53`.
    #[serde(default)]
    pub duration: String,
    /// ISO 8601 duration as reported by the API, e.g. `PT3H31M53S`.
    #[serde(default)]
    pub duration_raw: String,
    /// Captions status, not the transcript text itself.
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    pub video_id: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl VideoMetadata {
    /// Document over the video description, tagged with the video's identity.
    pub fn to_document(&self) -> Document {
        let mut metadata = Metadata::new();
        metadata.insert("video_id".to_string(), MetadataValue::from(self.video_id.as_str()));
        metadata.insert("title".to_string(), MetadataValue::from(self.title.as_str()));
        metadata.insert("youtuber".to_string(), MetadataValue::from(self.youtuber.as_str()));
        Document::with_metadata(self.description.clone(), metadata)
    }

    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Trait for video source providers.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Short name for logs and output.
    fn name(&self) -> &'static str;

    /// Check if this source can handle the given input.
    fn can_handle(&self, input: &str) -> bool;

    /// Fetch all videos the input refers to.
    async fn fetch_videos(&self, input: &str) -> Result<Vec<VideoMetadata>>;
}

/// Extract a video ID from a YouTube URL or a bare ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    let caps = VIDEO_ID_REGEX.captures(input.trim())?;

    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Parse an ISO 8601 video duration (`PT#H#M#S`) into seconds.
pub fn parse_iso8601_duration(raw: &str) -> Option<u64> {
    let caps = DURATION_REGEX.captures(raw.trim())?;
    let part = |i: usize| -> u64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    Some(part(1) * 3600 + part(2) * 60 + part(3))
}

/// Format seconds as `H:MM:SS`, `MM:SS` or `SS`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{:02}:{:02}", minutes, secs)
    } else {
        format!("{:02}", secs)
    }
}

/// Readable form of an ISO 8601 duration; unparseable input is returned as is.
pub fn display_duration(raw: &str) -> String {
    parse_iso8601_duration(raw)
        .map(format_duration)
        .unwrap_or_else(|| raw.to_string())
}

/// Detect the appropriate video source for the given input.
///
/// Existing JSON files win over YouTube IDs, since an 11-character file name
/// could also look like an ID.
pub fn detect_source(input: &str, youtube_api_key: Option<String>) -> Result<Option<Box<dyn VideoSource>>> {
    let file = FileSource::new();
    if file.can_handle(input) {
        return Ok(Some(Box::new(file)));
    }

    if extract_video_id(input).is_some() {
        return Ok(Some(Box::new(YoutubeSource::new(youtube_api_key)?)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_formats() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtube.com/watch?v=dQw4w9WgXcQ&t=42s", "dQw4w9WgXcQ"),
            ("youtube.com/watch?v=dQw4w9WgXcQ#comments", "dQw4w9WgXcQ"),
            ("https://youtu.be/dQw4w9WgXcQ?si=abc", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("http://www.youtube.com/v/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("  dQw4w9WgXcQ  ", "dQw4w9WgXcQ"),
        ];
        for (input, expected) in cases {
            assert_eq!(extract_video_id(input).as_deref(), Some(expected), "{}", input);
        }
    }

    #[test]
    fn test_extract_video_id_rejects_other_input() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("too-short"), None);
        assert_eq!(extract_video_id("video.json"), None);
    }

    #[test]
    fn test_parse_iso8601_duration() {
        assert_eq!(parse_iso8601_duration("PT3H31M53S"), Some(12713));
        assert_eq!(parse_iso8601_duration("PT4M5S"), Some(245));
        assert_eq!(parse_iso8601_duration("PT7S"), Some(7));
        assert_eq!(parse_iso8601_duration("PT1H"), Some(3600));
        assert_eq!(parse_iso8601_duration("P1D"), None);
        assert_eq!(parse_iso8601_duration("3:31"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(12713), "3:31:53");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(245), "04:05");
        assert_eq!(format_duration(7), "07");
        assert_eq!(display_duration("PT3H31M53S"), "3:31:53");
        assert_eq!(display_duration("P1D"), "P1D");
    }

    fn sample() -> VideoMetadata {
        serde_json::from_str(
            r#"{
                "title": "Build a Full Stack RAG System",
                "youtuber": "notJust.dev",
                "like_count": 261,
                "view_count": 8125,
                "comment_count": 9,
                "duration": "3:31:53",
                "duration_raw": "PT3H31M53S",
                "transcript": "Captions available (download separately)",
                "published_at": "2025-03-22T06:26:40Z",
                "description": "Scrape transcripts with BrightData.",
                "video_id": "abcdefghijk",
                "thumbnail": "https://i.ytimg.com/vi/abcdefghijk/hqdefault.jpg"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_metadata_parses_export_format() {
        let video = sample();
        assert_eq!(video.like_count, 261);
        assert_eq!(video.published_at.unwrap().to_rfc3339(), "2025-03-22T06:26:40+00:00");
        assert_eq!(video.url(), "https://www.youtube.com/watch?v=abcdefghijk");
    }

    #[test]
    fn test_to_document() {
        let doc = sample().to_document();
        assert_eq!(doc.text(), "Scrape transcripts with BrightData.");
        assert_eq!(doc.metadata().len(), 3);
        assert_eq!(
            doc.metadata().get("video_id"),
            Some(&MetadataValue::from("abcdefghijk"))
        );
        assert_eq!(
            doc.metadata().get("youtuber"),
            Some(&MetadataValue::from("notJust.dev"))
        );
    }

    #[test]
    fn test_detect_source_prefers_existing_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("videos.json");
        std::fs::write(&path, "[]").unwrap();

        let source = detect_source(path.to_str().unwrap(), None).unwrap().unwrap();
        assert_eq!(source.name(), "file");

        let source = detect_source("dQw4w9WgXcQ", Some("key".to_string())).unwrap().unwrap();
        assert_eq!(source.name(), "youtube");

        assert!(detect_source("not a video", None).unwrap().is_none());
    }
}
