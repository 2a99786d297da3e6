//! Prompt templates for ragyt.
//!
//! Prompts can be customized by placing `agent.toml` in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts used by the agent loop and its retrieval tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
    pub retrieve_description: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant answering questions about a YouTube video.

You have a 'retrieve' tool that returns the most relevant passages from the video's description.

Guidelines:
- Call 'retrieve' with a focused search query whenever the question may be answered by the video
- You may call it more than once with different queries
- Answer from the retrieved passages; if they do not contain the answer, say so and answer from general knowledge, making clear which is which
- Be concise"#
                .to_string(),

            retrieve_description:
                "Retrieve the most relevant chunks of text from the description of a youtube video"
                    .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let agent_path = PathBuf::from(shellexpand::tilde(dir).to_string()).join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// The agent system prompt with custom variables applied.
    pub fn agent_system(&self) -> String {
        Self::render(&self.agent.system, &self.variables)
    }

    /// The retrieval tool description with custom variables applied.
    pub fn retrieve_description(&self) -> String {
        Self::render(&self.agent.retrieve_description, &self.variables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.agent.system.contains("retrieve"));
        assert!(prompts.agent.retrieve_description.contains("youtube video"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        assert_eq!(Prompts::render(template, &vars), "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_retrieve_description_is_rendered() {
        let mut prompts = Prompts::default();
        prompts.agent.retrieve_description = "Search videos by {{channel}}".to_string();
        prompts.variables.insert("channel".to_string(), "notJust.dev".to_string());
        assert_eq!(prompts.retrieve_description(), "Search videos by notJust.dev");
    }

    #[test]
    fn test_custom_dir_overrides_agent_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agent.toml"),
            "system = \"Answer in {{language}}.\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("language".to_string(), "Norwegian".to_string());
        let prompts = Prompts::load(dir.path().to_str(), Some(&vars)).unwrap();

        assert_eq!(prompts.agent_system(), "Answer in Norwegian.");
        assert_eq!(prompts.retrieve_description(), prompts.agent.retrieve_description);
        // Fields missing from the file keep their defaults.
        assert!(prompts.agent.retrieve_description.contains("youtube video"));
    }
}
