//! Agent runner with tool calling loop.

use super::tools::{ToolRegistry, ToolSpec};
use crate::error::{RagytError, Result};
use crate::llm::{AgentTurn, LlmBackend, ToolInvocation};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default bound on LLM calls per question.
pub const DEFAULT_MAX_TURNS: usize = 15;

/// Where the loop is in handling one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    /// Waiting for the model's next step.
    Thinking,
    /// Dispatching tool calls the model requested.
    ToolCall,
    /// Tool output appended to the conversation.
    ToolResult,
    /// The model answered without calling a tool.
    Done,
}

/// Agent that can use tools to answer a question.
pub struct Agent {
    backend: Arc<dyn LlmBackend>,
    tools: ToolRegistry,
    max_turns: usize,
}

impl Agent {
    /// Create a new agent with the given backend and tools.
    pub fn new(backend: Arc<dyn LlmBackend>, tools: ToolRegistry) -> Self {
        Self {
            backend,
            tools,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    /// Set the maximum number of LLM calls for one run.
    pub fn with_max_turns(mut self, max: usize) -> Self {
        self.max_turns = max;
        self
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Tools offered to the model.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.specs()
    }

    /// Answer a question, calling tools as the model requests.
    pub async fn run(&self, question: &str) -> Result<AgentResponse> {
        let specs = self.tools.specs();
        let mut history = vec![AgentTurn::user(question)];
        let mut tool_calls_made = Vec::new();
        let mut turns = 0;
        let mut state = AgentState::Thinking;

        loop {
            match state {
                AgentState::Thinking => {
                    turns += 1;
                    if turns > self.max_turns {
                        return Err(RagytError::AgentExhausted {
                            max_turns: self.max_turns,
                        });
                    }
                    debug!("Agent turn {} ({} turns in context)", turns, history.len());

                    let reply = self.think(&history, &specs).await?;
                    state = if reply.requests_tools() {
                        AgentState::ToolCall
                    } else {
                        AgentState::Done
                    };
                    history.push(reply);
                }

                AgentState::ToolCall => {
                    let invocations = history
                        .last()
                        .map(|turn| turn.tool_calls.clone())
                        .unwrap_or_default();

                    for invocation in &invocations {
                        let record = self.execute_tool_call(invocation).await?;
                        history.push(AgentTurn::tool_result(&invocation.id, &record.result));
                        tool_calls_made.push(record);
                    }
                    state = AgentState::ToolResult;
                }

                AgentState::ToolResult => {
                    debug!("Tool results appended, returning to model");
                    state = AgentState::Thinking;
                }

                AgentState::Done => {
                    let content = history.last().map(|t| t.content.clone()).unwrap_or_default();
                    info!("Agent finished after {} turn(s), {} tool call(s)", turns, tool_calls_made.len());
                    return Ok(AgentResponse {
                        content,
                        tool_calls: tool_calls_made,
                        turns,
                    });
                }
            }
        }
    }

    async fn think(&self, history: &[AgentTurn], specs: &[ToolSpec]) -> Result<AgentTurn> {
        self.backend.complete(history, specs).await.map_err(|e| match e {
            RagytError::LlmUnavailable(_) => e,
            other => RagytError::LlmUnavailable(other.to_string()),
        })
    }

    /// Execute a single tool call. Schema mismatches become error output for
    /// the model; any other failure aborts the run.
    async fn execute_tool_call(&self, invocation: &ToolInvocation) -> Result<ToolCallRecord> {
        info!("Agent calling tool: {} with args: {}", invocation.name, invocation.arguments);

        let (result, rejected) = match self.tools.dispatch(invocation).await {
            Ok(output) => (output, false),
            Err(e) if e.is_recoverable_in_conversation() => {
                warn!("Rejected tool call {}: {}", invocation.name, e);
                (format!("Tool error: {}", e), true)
            }
            Err(e) => return Err(e),
        };

        Ok(ToolCallRecord {
            name: invocation.name.clone(),
            arguments: invocation.arguments.clone(),
            result,
            rejected,
        })
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final answer.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of LLM calls used.
    pub turns: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool, or the error reported to the model.
    pub result: String,
    /// Whether the call was rejected for not matching the tool's schema.
    pub rejected: bool,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
