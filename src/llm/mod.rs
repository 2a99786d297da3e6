//! Chat backends driving the agent loop.
//!
//! A backend receives the running conversation and the available tool specs
//! and returns the next assistant turn: either tool invocations or a final answer.

mod openai;
mod scripted;

pub use openai::OpenAiChatBackend;
pub use scripted::ScriptedBackend;

use crate::agent::ToolSpec;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::Tool => write!(f, "tool"),
        }
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Backend-assigned call ID, echoed back on the tool turn.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Raw JSON arguments as generated by the model.
    pub arguments: String,
}

impl ToolInvocation {
    pub fn new(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }
}

/// One entry in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTurn {
    pub role: Role,
    pub content: String,
    /// Tool calls requested by an assistant turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolInvocation>,
    /// The invocation a tool turn answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl AgentTurn {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant turn requesting tool calls.
    pub fn tool_request(tool_calls: Vec<ToolInvocation>) -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            tool_calls,
            tool_call_id: None,
        }
    }

    pub fn tool_result(tool_call_id: &str, content: &str) -> Self {
        Self {
            role: Role::Tool,
            content: content.to_string(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }

    /// Whether this turn asks for at least one tool call.
    pub fn requests_tools(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty()
    }
}

/// Chat completion backend used by the agent.
///
/// Errors (timeouts, rate limits, malformed responses) must be reported as
/// [`crate::RagytError::LlmUnavailable`]. Retrying is the backend's own business.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Produce the next assistant turn for the conversation.
    async fn complete(&self, history: &[AgentTurn], tools: &[ToolSpec]) -> Result<AgentTurn>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let request = AgentTurn::tool_request(vec![ToolInvocation::new("call_1", "retrieve", "{}")]);
        assert!(request.requests_tools());
        assert!(!AgentTurn::assistant("done").requests_tools());

        let result = AgentTurn::tool_result("call_1", "chunk text");
        assert_eq!(result.role, Role::Tool);
        assert_eq!(result.tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_turn_json_omits_empty_fields() {
        let json = serde_json::to_string(&AgentTurn::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
