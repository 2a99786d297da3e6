//! YouTube Data API v3 source.

use super::{display_duration, extract_video_id, VideoMetadata, VideoSource};
use crate::error::{RagytError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/youtube/v3/";

const CAPTIONS_AVAILABLE: &str = "Captions available (download separately)";
const CAPTIONS_NONE: &str = "No captions available";
const CAPTIONS_CHECK_FAILED: &str = "Captions check failed";
const CAPTIONS_UNAVAILABLE: &str = "Captions unavailable";

#[derive(Debug, Default, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
    #[serde(default)]
    content_details: ContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// The API reports counts as decimal strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    like_count: Option<String>,
    view_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentDetails {
    #[serde(default)]
    duration: String,
}

#[derive(Debug, Default, Deserialize)]
struct CaptionListResponse {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

fn count(raw: &Option<String>) -> u64 {
    raw.as_deref().and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Fetches video metadata from the YouTube Data API.
pub struct YoutubeSource {
    client: reqwest::Client,
    api_key: String,
    api_base: Url,
}

impl YoutubeSource {
    /// Create a source; an API key is required.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            RagytError::Config(
                "YouTube API key not set. Use --api-key, youtube.api_key in config, or YOUTUBE_API_KEY"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RagytError::VideoSource(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = Url::parse(API_BASE)
            .map_err(|e| RagytError::Config(format!("Invalid YouTube API URL: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            api_base,
        })
    }

    /// Point the source at a different API root (must end with `/`).
    pub fn with_api_base(mut self, base: &str) -> Result<Self> {
        self.api_base =
            Url::parse(base).map_err(|e| RagytError::Config(format!("Invalid YouTube API URL '{}': {}", base, e)))?;
        Ok(self)
    }

    /// Request URL including the API key. Errors built from requests to it
    /// must drop the URL.
    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self
            .api_base
            .join(resource)
            .map_err(|e| RagytError::Config(format!("Invalid YouTube API URL: {}", e)))?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Fetch metadata for a single video ID.
    #[instrument(skip(self))]
    pub async fn fetch_video(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = self.endpoint(
            "videos",
            &[("id", video_id), ("part", "snippet,statistics,contentDetails")],
        )?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RagytError::VideoSource(format!("YouTube API request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RagytError::VideoSource(format!("API Error: {}", status)));
        }

        let body: VideoListResponse = response
            .json()
            .await
            .map_err(|e| {
                RagytError::VideoSource(format!("Failed to parse YouTube API response: {}", e.without_url()))
            })?;

        let transcript = self.captions_status(video_id).await;
        video_from_response(video_id, body, transcript)
    }

    /// Whether captions exist. Never fails; problems become a status string.
    async fn captions_status(&self, video_id: &str) -> String {
        let url = match self.endpoint("captions", &[("videoId", video_id), ("part", "snippet")]) {
            Ok(url) => url,
            Err(_) => return CAPTIONS_UNAVAILABLE.to_string(),
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Captions request failed: {}", e.without_url());
                return CAPTIONS_UNAVAILABLE.to_string();
            }
        };

        if !response.status().is_success() {
            return CAPTIONS_CHECK_FAILED.to_string();
        }

        match response.json::<CaptionListResponse>().await {
            Ok(captions) if !captions.items.is_empty() => CAPTIONS_AVAILABLE.to_string(),
            Ok(_) => CAPTIONS_NONE.to_string(),
            Err(_) => CAPTIONS_UNAVAILABLE.to_string(),
        }
    }
}

fn video_from_response(video_id: &str, response: VideoListResponse, transcript: String) -> Result<VideoMetadata> {
    let video = response.items.into_iter().next().ok_or_else(|| {
        RagytError::VideoNotFound(format!("Video {} not found or is private/unavailable", video_id))
    })?;

    let Thumbnails { high, default } = video.snippet.thumbnails;
    let raw_duration = video.content_details.duration;

    Ok(VideoMetadata {
        title: video.snippet.title,
        youtuber: video.snippet.channel_title,
        like_count: count(&video.statistics.like_count),
        view_count: count(&video.statistics.view_count),
        comment_count: count(&video.statistics.comment_count),
        duration: display_duration(&raw_duration),
        duration_raw: raw_duration,
        transcript: Some(transcript),
        published_at: video.snippet.published_at,
        description: video.snippet.description,
        video_id: video_id.to_string(),
        thumbnail: high.or(default).map(|t| t.url),
    })
}

#[async_trait]
impl VideoSource for YoutubeSource {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn can_handle(&self, input: &str) -> bool {
        extract_video_id(input).is_some()
    }

    async fn fetch_videos(&self, input: &str) -> Result<Vec<VideoMetadata>> {
        let video_id = extract_video_id(input)
            .ok_or_else(|| RagytError::InvalidInput(format!("Invalid YouTube URL: {}", input)))?;

        info!("Fetching YouTube video {}", video_id);
        Ok(vec![self.fetch_video(&video_id).await?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "items": [{
            "snippet": {
                "title": "Build a Full Stack RAG System",
                "channelTitle": "notJust.dev",
                "publishedAt": "2025-03-22T06:26:40Z",
                "description": "Deploy with Genezio.",
                "thumbnails": {
                    "default": {"url": "https://i.ytimg.com/default.jpg"},
                    "high": {"url": "https://i.ytimg.com/hq.jpg"}
                }
            },
            "statistics": {"viewCount": "8125", "likeCount": "261"},
            "contentDetails": {"duration": "PT3H31M53S"}
        }]
    }"#;

    #[test]
    fn test_requires_api_key() {
        assert!(matches!(YoutubeSource::new(None), Err(RagytError::Config(_))));
        assert!(matches!(YoutubeSource::new(Some("  ".to_string())), Err(RagytError::Config(_))));
        assert!(YoutubeSource::new(Some("key".to_string())).is_ok());
    }

    #[test]
    fn test_endpoint_query() {
        let source = YoutubeSource::new(Some("secret".to_string())).unwrap();
        let url = source
            .endpoint("videos", &[("id", "abcdefghijk"), ("part", "snippet,statistics,contentDetails")])
            .unwrap();

        assert_eq!(url.path(), "/youtube/v3/videos");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("id".to_string(), "abcdefghijk".to_string())));
        assert!(pairs.contains(&("part".to_string(), "snippet,statistics,contentDetails".to_string())));
        assert!(pairs.contains(&("key".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_video_from_response() {
        let body: VideoListResponse = serde_json::from_str(RESPONSE).unwrap();
        let video = video_from_response("abcdefghijk", body, CAPTIONS_NONE.to_string()).unwrap();

        assert_eq!(video.title, "Build a Full Stack RAG System");
        assert_eq!(video.youtuber, "notJust.dev");
        assert_eq!(video.view_count, 8125);
        assert_eq!(video.like_count, 261);
        assert_eq!(video.comment_count, 0);
        assert_eq!(video.duration, "3:31:53");
        assert_eq!(video.duration_raw, "PT3H31M53S");
        assert_eq!(video.thumbnail.as_deref(), Some("https://i.ytimg.com/hq.jpg"));
        assert_eq!(video.transcript.as_deref(), Some("No captions available"));
    }

    #[test]
    fn test_empty_items_is_not_found() {
        let body: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        let err = video_from_response("abcdefghijk", body, String::new()).unwrap_err();
        assert!(matches!(err, RagytError::VideoNotFound(_)));
    }

    #[tokio::test]
    async fn test_request_errors_do_not_expose_api_key() {
        let source = YoutubeSource::new(Some("SECRET_KEY_123".to_string()))
            .unwrap()
            .with_api_base("http://127.0.0.1:9/youtube/v3/")
            .unwrap();

        let err = source.fetch_videos("abcdefghijk").await.unwrap_err();
        assert!(matches!(err, RagytError::VideoSource(_)));
        assert!(!err.to_string().contains("SECRET_KEY_123"), "{}", err);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_video_source_error() {
        let source = YoutubeSource::new(Some("key".to_string()))
            .unwrap()
            .with_api_base("http://127.0.0.1:9/youtube/v3/")
            .unwrap();

        let err = source.fetch_videos("abcdefghijk").await.unwrap_err();
        assert!(matches!(err, RagytError::VideoSource(_)));
        assert_eq!(source.captions_status("abcdefghijk").await, CAPTIONS_UNAVAILABLE);
    }
}
