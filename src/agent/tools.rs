//! Tool definitions and implementations for the agent system.

use super::schema::{SchemaField, ToolSchema};
use crate::error::{RagytError, Result};
use crate::llm::ToolInvocation;
use crate::vector_store::{MemoryVectorStore, SearchOptions};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Public contract of a tool: what the model is told about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub schema: ToolSchema,
}

/// A named, schema-validated callable the agent may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn spec(&self) -> ToolSpec;

    /// Run the tool. `args` has already been validated against `spec().schema`.
    async fn call(&self, args: Value) -> Result<String>;
}

/// Tools available to one agent, keyed by name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.spec().name, tool);
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|t| t.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate an invocation against the named tool's schema, then run it.
    ///
    /// Unknown tools and malformed arguments fail with
    /// [`RagytError::ToolSchemaMismatch`]; errors from the tool itself pass through.
    pub async fn dispatch(&self, invocation: &ToolInvocation) -> Result<String> {
        let tool = self.tools.get(&invocation.name).ok_or_else(|| {
            RagytError::ToolSchemaMismatch(format!("unknown tool '{}'", invocation.name))
        })?;

        let raw = if invocation.arguments.trim().is_empty() {
            "{}"
        } else {
            invocation.arguments.as_str()
        };
        let args: Value = serde_json::from_str(raw).map_err(|e| {
            RagytError::ToolSchemaMismatch(format!(
                "arguments for '{}' are not valid JSON: {}",
                invocation.name, e
            ))
        })?;

        tool.spec()
            .schema
            .validate(&args)
            .map_err(|msg| RagytError::ToolSchemaMismatch(format!("{}: {}", invocation.name, msg)))?;

        tool.call(args).await
    }
}

/// Name of the retrieval tool.
pub const RETRIEVE_TOOL: &str = "retrieve";

const DEFAULT_RETRIEVE_DESCRIPTION: &str =
    "Retrieve the most relevant chunks of text from the description of a youtube video";

#[derive(Debug, Deserialize)]
struct RetrieveArgs {
    query: String,
}

/// Wraps a top-k index query; returns the chunk texts joined by newlines.
pub struct RetrievalTool {
    index: Arc<MemoryVectorStore>,
    options: SearchOptions,
    description: String,
}

impl RetrievalTool {
    /// Retrieval with `k = 3`.
    pub fn new(index: Arc<MemoryVectorStore>) -> Self {
        Self::with_options(index, SearchOptions::top_k(3))
    }

    pub fn with_options(index: Arc<MemoryVectorStore>, options: SearchOptions) -> Self {
        Self {
            index,
            options,
            description: DEFAULT_RETRIEVE_DESCRIPTION.to_string(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Run a retrieval directly.
    pub async fn retrieve(&self, query: &str) -> Result<String> {
        info!("Retrieving chunks for query: {}", query);

        let results = self.index.search_with(query, &self.options).await?;
        Ok(results
            .iter()
            .map(|r| r.entry.text())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[async_trait]
impl Tool for RetrievalTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: RETRIEVE_TOOL.to_string(),
            description: self.description.clone(),
            schema: ToolSchema::new(vec![SchemaField::string(
                "query",
                "What to look for in the video description",
            )]),
        }
    }

    async fn call(&self, args: Value) -> Result<String> {
        let args: RetrieveArgs = serde_json::from_value(args)
            .map_err(|e| RagytError::ToolSchemaMismatch(format!("{}: {}", RETRIEVE_TOOL, e)))?;
        self.retrieve(&args.query).await
    }
}
