//! Ask command implementation.

use super::load_documents;
use crate::cli::preflight::{self, Operation};
use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::{anyhow, Result};
use std::time::Duration;

/// Run the ask command.
pub async fn run_ask(
    input: &str,
    question: &str,
    model: Option<String>,
    max_turns: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    if let Some(model) = model {
        settings.llm.model = model;
    }
    if let Some(max_turns) = max_turns {
        settings.agent.max_turns = max_turns;
    }

    if let Err(e) = preflight::check(Operation::Ask, input, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    // Validates the overridden settings before anything is fetched.
    let orchestrator = Orchestrator::new(settings.clone())?;
    let documents = load_documents(input, &settings).await?;

    let spinner = Output::spinner("Thinking...");
    let run = orchestrator.ask(&documents, question);
    let result = match settings.agent.timeout_seconds {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), run).await {
            Ok(result) => result,
            Err(_) => {
                spinner.finish_and_clear();
                Output::error(&format!("Agent timed out after {}s", secs));
                return Err(anyhow!("agent timed out after {}s", secs));
            }
        },
        None => run.await,
    };
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.content);

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    if call.rejected {
                        Output::warning(&format!("  {} -> {}", call, call.result));
                    } else {
                        Output::info(&format!("  {}", content_preview(&call.to_string(), 80)));
                    }
                }
                println!();
            }

            Output::kv("model", &settings.llm.model);
            Output::kv("turns", &response.turns.to_string());
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
