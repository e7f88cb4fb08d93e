//! Fake LLM provider for testing.
//!
//! This provider returns deterministic responses based on prompt matching,
//! allowing tests and offline runs to exercise the generation path without
//! network access.

use super::{LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::RwLock;

/// A fake LLM provider.
///
/// Responses are matched by checking if the prompt contains a registered
/// substring, first registration wins. If no match is found, returns the
/// default response or an error.
#[derive(Debug)]
pub struct FakeProvider {
    /// (prompt substring, response) pairs in registration order
    responses: RwLock<Vec<(String, String)>>,
    /// Default response if no match found
    default_response: Option<String>,
}

impl FakeProvider {
    /// Create a new FakeProvider with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_response: None,
        }
    }

    /// Create a FakeProvider that returns a specific response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        // A poisoned lock only means a panicking test; keep serving.
        let mut responses = self
            .responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        responses.push((prompt_contains.to_string(), response.to_string()));
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// A FakeProvider answering every instructions prompt with numbered steps.
    pub fn with_instruction_responses() -> Self {
        let provider = Self::new().with_default_response(
            "1. Prepare and measure all ingredients.\n2. Cook over medium heat until done.\n3. Season to taste and serve.",
        );

        provider.add_response(
            "step-by-step recipe",
            "1. Wash and chop the ingredients.\n2. Heat oil in a pan over medium heat.\n3. Cook the ingredients, stirring often, until tender.\n4. Season with salt and pepper and serve. If anything is missing, substitute a similar ingredient you have on hand.",
        );

        provider
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let responses = self
            .responses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(response.clone());
            }
        }

        match &self.default_response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::RequestFailed(format!(
                "FakeProvider: No response configured for prompt (first 100 chars): {}",
                prompt.chars().take(100).collect::<String>()
            ))),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
