//! Text-generation provider abstraction.
//!
//! The instruction generator only needs prompt-in/text-out, so every backend
//! (IBM watsonx.ai, Claude, the in-process fake) sits behind [`LlmProvider`].

mod claude;
mod config;
mod fake;
mod watsonx;

pub use claude::ClaudeProvider;
pub use config::{
    ConfigError, DecodingParams, ProviderConfig, ProviderKind, DEFAULT_CLAUDE_MODEL,
    DEFAULT_CLAUDE_URL, DEFAULT_MAX_NEW_TOKENS, DEFAULT_STOP_SEQUENCE, DEFAULT_TEMPERATURE,
    DEFAULT_WATSONX_MODEL, DEFAULT_WATSONX_URL,
};
pub use fake::FakeProvider;
pub use watsonx::WatsonxProvider;

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl From<ConfigError> for LlmError {
    fn from(err: ConfigError) -> Self {
        LlmError::NotConfigured(err.to_string())
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe; one provider is shared by every
/// request for the lifetime of the process.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Check credentials and reachability once at startup.
    async fn verify(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Get the provider name (e.g., "watsonx", "claude", "fake").
    fn provider_name(&self) -> &'static str;

    /// Get the model name (e.g., "ibm/granite-13b-chat-v2").
    fn model_name(&self) -> &str;
}

/// Build the provider selected by `config`.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match config.kind {
        ProviderKind::Fake => Ok(Box::new(FakeProvider::with_instruction_responses())),
        ProviderKind::Watsonx => Ok(Box::new(WatsonxProvider::from_config(config)?)),
        ProviderKind::Claude => Ok(Box::new(ClaudeProvider::from_config(config)?)),
        ProviderKind::Disabled => Err(LlmError::NotConfigured(
            "text generation disabled by PANTRY_AI_PROVIDER".to_string(),
        )),
    }
}

/// Shared HTTP client for the network-backed providers.
fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, LlmError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| LlmError::NotConfigured(format!("HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: ProviderKind) -> ProviderConfig {
        ProviderConfig {
            kind,
            api_key: None,
            project_id: None,
            base_url: String::new(),
            model: "m".to_string(),
            decoding: DecodingParams::default(),
            timeout: None,
        }
    }

    #[test]
    fn test_create_fake_provider() {
        let provider = create_provider(&config(ProviderKind::Fake)).unwrap();
        assert_eq!(provider.provider_name(), "fake");
    }

    #[test]
    fn test_create_requires_credentials() {
        assert!(matches!(
            create_provider(&config(ProviderKind::Watsonx)),
            Err(LlmError::NotConfigured(_))
        ));
        assert!(matches!(
            create_provider(&config(ProviderKind::Claude)),
            Err(LlmError::NotConfigured(_))
        ));
        assert!(matches!(
            create_provider(&config(ProviderKind::Disabled)),
            Err(LlmError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_create_with_credentials() {
        let mut claude = config(ProviderKind::Claude);
        claude.api_key = Some("sk-test".to_string());
        let provider = create_provider(&claude).unwrap();
        assert_eq!(provider.provider_name(), "claude");
        assert_eq!(provider.model_name(), "m");

        let mut watsonx = config(ProviderKind::Watsonx);
        watsonx.api_key = Some("ibm-key".to_string());
        watsonx.project_id = Some("project".to_string());
        let provider = create_provider(&watsonx).unwrap();
        assert_eq!(provider.provider_name(), "watsonx");
    }
}
