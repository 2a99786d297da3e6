//! ragyt - Retrieval-augmented question answering over YouTube videos
//!
//! A CLI tool and library that indexes a video's description and lets an LLM
//! agent answer questions about it, retrieving the relevant passages on demand.
//!
//! # Overview
//!
//! ragyt allows you to:
//! - Fetch video metadata from the YouTube Data API or an exported JSON file
//! - Split the description into overlapping character windows
//! - Embed and rank the windows by cosine similarity
//! - Ask questions answered by a tool-calling agent
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `document` - Documents and their scalar metadata
//! - `chunking` - Sliding-window text chunking
//! - `embedding` - Embedding backends (Ollama, OpenAI, local hashing)
//! - `vector_store` - In-memory top-k similarity index
//! - `llm` - Chat completion backends
//! - `agent` - Tool schemas, the retrieval tool and the agent loop
//! - `video_source` - YouTube and JSON file sources
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use ragyt::config::Settings;
//! use ragyt::document::Document;
//! use ragyt::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let docs = [Document::new("Deploy the backend with Genezio.")];
//!     let response = orchestrator.ask(&docs, "How do I deploy?").await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod vector_store;
pub mod video_source;

pub use error::{RagytError, Result};
