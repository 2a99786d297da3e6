//! Search command implementation.

use super::load_documents;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    input: &str,
    query: &str,
    k: Option<usize>,
    min_score: Option<f32>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(k) = k {
        settings.retrieval.k = k;
    }
    if min_score.is_some() {
        settings.retrieval.min_score = min_score;
    }

    if let Err(e) = preflight::check(Operation::Search, input, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    // Validates the overridden settings before anything is fetched.
    let orchestrator = Orchestrator::new(settings.clone())?;
    let options = orchestrator.retrieval_options();
    let documents = load_documents(input, &settings).await?;

    let spinner = Output::spinner("Searching...");
    let results = orchestrator.search(&documents, query, &options).await;
    spinner.finish_and_clear();

    match results {
        Ok(results) => {
            if results.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", results.len()));

                for (rank, result) in results.iter().enumerate() {
                    Output::search_result(
                        rank + 1,
                        result.score,
                        result.entry.text(),
                        &result.entry.chunk.metadata,
                    );
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
