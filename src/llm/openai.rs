//! OpenAI-compatible chat completion backend (OpenAI, Groq, ...).

use super::{AgentTurn, LlmBackend, Role, ToolInvocation};
use crate::agent::ToolSpec;
use crate::config::LlmSettings;
use crate::error::{RagytError, Result};
use crate::openai::create_compatible_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs, ChatCompletionTool,
    ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall, FunctionObject,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Chat backend speaking the OpenAI chat completions protocol.
pub struct OpenAiChatBackend {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    system_prompt: Option<String>,
}

impl OpenAiChatBackend {
    /// Create a backend from settings; the API key is read from `api_key_env`.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        let api_key = settings.api_key();
        let client = create_compatible_client(
            settings.base_url.as_deref(),
            api_key.as_deref(),
            Duration::from_secs(settings.timeout_seconds),
        )?;

        Ok(Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            system_prompt: None,
        })
    }

    /// Prepend a system message to every request.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = Some(prompt.to_string());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_messages(&self, history: &[AgentTurn]) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(history.len() + 1);

        if let Some(system) = &self.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system.clone())
                    .build()
                    .map_err(request_error)?
                    .into(),
            );
        }

        for turn in history {
            let message: ChatCompletionRequestMessage = match turn.role {
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.content.clone())
                    .build()
                    .map_err(request_error)?
                    .into(),
                Role::Assistant => {
                    let mut args = ChatCompletionRequestAssistantMessageArgs::default();
                    if !turn.content.is_empty() {
                        args.content(turn.content.clone());
                    }
                    if !turn.tool_calls.is_empty() {
                        args.tool_calls(turn.tool_calls.iter().map(to_openai_call).collect::<Vec<_>>());
                    }
                    args.build().map_err(request_error)?.into()
                }
                Role::Tool => ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(turn.tool_call_id.clone().unwrap_or_default())
                    .content(turn.content.clone())
                    .build()
                    .map_err(request_error)?
                    .into(),
            };
            messages.push(message);
        }

        Ok(messages)
    }
}

#[async_trait]
impl LlmBackend for OpenAiChatBackend {
    #[instrument(skip(self, history, tools), fields(model = %self.model, turns = history.len()))]
    async fn complete(&self, history: &[AgentTurn], tools: &[ToolSpec]) -> Result<AgentTurn> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(self.build_messages(history)?)
            .temperature(self.temperature);
        if !tools.is_empty() {
            args.tools(tool_definitions(tools));
        }
        let request = args.build().map_err(request_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| RagytError::LlmUnavailable(format!("Chat API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RagytError::LlmUnavailable("No response from model".to_string()))?;

        let tool_calls: Vec<ToolInvocation> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolInvocation {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        debug!("Model returned {} tool call(s)", tool_calls.len());

        Ok(AgentTurn {
            role: Role::Assistant,
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            tool_call_id: None,
        })
    }
}

fn request_error(e: impl std::fmt::Display) -> RagytError {
    RagytError::LlmUnavailable(format!("Failed to build chat request: {}", e))
}

fn to_openai_call(call: &ToolInvocation) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: call.id.clone(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    }
}

/// Convert tool specs into OpenAI function tool definitions.
pub fn tool_definitions(tools: &[ToolSpec]) -> Vec<ChatCompletionTool> {
    tools
        .iter()
        .map(|spec| ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: spec.name.clone(),
                description: Some(spec.description.clone()),
                parameters: Some(spec.schema.to_json_schema()),
                strict: None,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{SchemaField, ToolSchema};

    fn backend() -> OpenAiChatBackend {
        OpenAiChatBackend::from_settings(&LlmSettings::default())
            .unwrap()
            .with_system_prompt("be brief")
    }

    #[test]
    fn test_messages_include_system_and_tool_turns() {
        let history = vec![
            AgentTurn::user("How to scrape transcripts?"),
            AgentTurn::tool_request(vec![ToolInvocation::new("call_1", "retrieve", r#"{"query":"scrape"}"#)]),
            AgentTurn::tool_result("call_1", "Use BrightData"),
            AgentTurn::assistant("Use BrightData."),
        ];

        let messages = backend().build_messages(&history).unwrap();
        assert_eq!(messages.len(), 5);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        match &messages[2] {
            ChatCompletionRequestMessage::Assistant(msg) => {
                let calls = msg.tool_calls.as_ref().unwrap();
                assert_eq!(calls[0].function.name, "retrieve");
            }
            other => panic!("expected assistant message, got {:?}", other),
        }
        match &messages[3] {
            ChatCompletionRequestMessage::Tool(msg) => assert_eq!(msg.tool_call_id, "call_1"),
            other => panic!("expected tool message, got {:?}", other),
        }
    }

    #[test]
    fn test_tool_definitions_carry_schema() {
        let spec = ToolSpec {
            name: "retrieve".to_string(),
            description: "Retrieve chunks".to_string(),
            schema: ToolSchema::new(vec![SchemaField::string("query", "Search query")]),
        };
        let defs = tool_definitions(&[spec]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, "retrieve");
        let params = defs[0].function.parameters.as_ref().unwrap();
        assert_eq!(params["required"], serde_json::json!(["query"]));
    }
}
