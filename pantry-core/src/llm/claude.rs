//! Claude (Anthropic) LLM provider.

use super::config::{DecodingParams, ProviderConfig};
use super::{http_client, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Claude API provider.
#[derive(Debug)]
pub struct ClaudeProvider {
    api_key: String,
    model: String,
    base_url: String,
    decoding: DecodingParams,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a provider from configuration. Requires an API key.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            decoding: config.decoding.clone(),
            client: http_client(config.timeout)?,
        })
    }

    fn build_request(&self, prompt: &str) -> ClaudeRequest {
        ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.decoding.max_new_tokens,
            // Claude has no greedy switch; zero temperature is the closest.
            temperature: if self.decoding.greedy {
                0.0
            } else {
                self.decoding.temperature
            },
            stop_sequences: self.decoding.stop_sequences.clone(),
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

/// Claude API request format.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

/// Claude API response format.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContent>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContent {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClaudeApiError {
    message: String,
}

/// Error response from Claude API.
#[derive(Debug, Deserialize)]
struct ClaudeErrorResponse {
    error: ClaudeApiError,
}

fn parse_response(body: &str) -> Result<String, LlmError> {
    let response: ClaudeResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    response
        .content
        .into_iter()
        .find_map(|c| {
            if c.content_type == "text" {
                c.text
            } else {
                None
            }
        })
        .ok_or_else(|| LlmError::ParseError("No text content in response".to_string()))
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = self.build_request(prompt);

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            if let Ok(error_response) = serde_json::from_str::<ClaudeErrorResponse>(&body) {
                return Err(LlmError::ApiError {
                    status,
                    message: error_response.error.message,
                });
            }
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        parse_response(&body)
    }

    fn provider_name(&self) -> &'static str {
        "claude"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
