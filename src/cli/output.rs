//! CLI output formatting utilities.

use crate::document::Metadata;
use crate::video_source::VideoMetadata;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a one-line video summary.
    pub fn video_info(video: &VideoMetadata) {
        println!(
            "  {} {} ({}, {}, {} views)",
            style("*").cyan(),
            style(&video.title).bold(),
            style(&video.video_id).dim(),
            video.youtuber,
            video.view_count
        );
    }

    /// Print one chunk of a split document.
    pub fn chunk(order: usize, chars: usize, content: &str) {
        println!(
            "\n{} {} ({} chars)",
            style(">>").green(),
            style(format!("chunk {}", order)).bold(),
            chars
        );
        println!("   {}", content_preview(content, 200));
    }

    /// Print search result.
    pub fn search_result(rank: usize, score: f32, content: &str, metadata: &Metadata) {
        let source = metadata
            .get("title")
            .or_else(|| metadata.get("video_id"))
            .map(|v| v.to_string())
            .unwrap_or_default();

        println!(
            "\n{} {} {} (score: {:.2})",
            style(">>").green(),
            style(format!("#{}", rank)).bold(),
            style(source).cyan(),
            score
        );
        println!("   {}", content_preview(content, 200));
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Flatten and truncate content with ellipsis.
pub(crate) fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
