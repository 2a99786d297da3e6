//! OpenAI client configuration with sensible defaults.

use crate::error::Result;
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with the default timeout, reading `OPENAI_API_KEY`.
pub fn create_client() -> Result<Client<OpenAIConfig>> {
    create_client_with(OpenAIConfig::default(), Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client for an OpenAI-compatible endpoint (OpenAI, Groq, a local proxy...).
pub fn create_compatible_client(
    base_url: Option<&str>,
    api_key: Option<&str>,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let mut config = OpenAIConfig::default();
    if let Some(base) = base_url {
        config = config.with_api_base(base.trim_end_matches('/'));
    }
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    create_client_with(config, timeout)
}

fn create_client_with(config: OpenAIConfig, timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Client::with_config(config).with_http_client(http_client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::config::Config;

    #[test]
    fn test_compatible_client_uses_base_url() {
        let client = create_compatible_client(
            Some("https://api.groq.com/openai/v1/"),
            Some("gsk-test"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.config().api_base(), "https://api.groq.com/openai/v1");
    }
}
