//! CLI module for ragyt.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// ragyt - Ask questions about YouTube videos
///
/// Indexes a video's description and answers questions about it with an LLM
/// agent that retrieves the relevant passages.
#[derive(Parser, Debug)]
#[command(name = "ragyt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch video metadata from the YouTube Data API
    Fetch {
        /// YouTube URL or video ID
        input: String,

        /// YouTube Data API v3 key (overrides config and YOUTUBE_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Write the JSON to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show how a video description is split into chunks
    Chunk {
        /// YouTube URL/ID, or a JSON file written by `fetch`
        input: String,
    },

    /// Search a video description for passages similar to a query
    Search {
        /// YouTube URL/ID, or a JSON file written by `fetch`
        input: String,

        /// Search query
        query: String,

        /// Number of results (defaults to retrieval.k)
        #[arg(short, long)]
        k: Option<usize>,

        /// Minimum similarity score (-1.0 to 1.0)
        #[arg(short, long)]
        min_score: Option<f32>,
    },

    /// Ask a question about a video
    Ask {
        /// YouTube URL/ID, or a JSON file written by `fetch`
        input: String,

        /// The question to ask
        question: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Maximum number of LLM calls
        #[arg(long)]
        max_turns: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from([
            "ragyt",
            "-vv",
            "ask",
            "video.json",
            "How do I deploy?",
            "--max-turns",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask {
                input,
                question,
                model,
                max_turns,
            } => {
                assert_eq!(input, "video.json");
                assert_eq!(question, "How do I deploy?");
                assert_eq!(model, None);
                assert_eq!(max_turns, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_options() {
        let cli = Cli::try_parse_from(["ragyt", "search", "dQw4w9WgXcQ", "genezio", "-k", "5", "-m", "0.2"]).unwrap();
        match cli.command {
            Commands::Search { k, min_score, .. } => {
                assert_eq!(k, Some(5));
                assert_eq!(min_score, Some(0.2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let cli = Cli::try_parse_from(["ragyt", "-c", "/tmp/ragyt.toml", "config", "init", "--force"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("/tmp/ragyt.toml"));
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
