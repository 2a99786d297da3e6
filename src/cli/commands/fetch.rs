//! Fetch command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::video_source::{VideoSource, YoutubeSource};
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(
    input: &str,
    api_key: Option<String>,
    output: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    if api_key.is_some() {
        settings.youtube.api_key = api_key;
    }

    if let Err(e) = preflight::check(Operation::Fetch, input, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let source = YoutubeSource::new(settings.youtube.resolve_api_key())?;

    let spinner = Output::spinner("Fetching video data...");
    let videos = source.fetch_videos(input).await;
    spinner.finish_and_clear();

    let videos = match videos {
        Ok(videos) => videos,
        Err(e) => {
            Output::error(&format!("Failed to fetch video data: {}", e));
            return Err(e.into());
        }
    };

    let json = serde_json::to_string_pretty(&videos)?;
    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, json)?;
            for video in &videos {
                Output::video_info(video);
            }
            Output::success(&format!("Saved to {}", path.display()));
        }
        None => println!("{}", json),
    }

    Ok(())
}
