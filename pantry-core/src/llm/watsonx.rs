//! IBM watsonx.ai text-generation provider.
//!
//! Authentication is a two-step exchange: the API key is traded for a
//! short-lived IAM bearer token, which is then sent with each generation
//! request. Tokens are cached and refreshed shortly before they expire.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::{ConfigError, DecodingParams, ProviderConfig};
use super::{http_client, LlmError, LlmProvider};

/// IBM Cloud IAM token endpoint.
const IAM_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// watsonx.ai API version date sent with every generation call.
const API_VERSION: &str = "2023-05-29";

/// Refresh tokens this long before their stated expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// watsonx.ai provider.
#[derive(Debug)]
pub struct WatsonxProvider {
    api_key: String,
    project_id: String,
    base_url: String,
    iam_url: String,
    model: String,
    decoding: DecodingParams,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl WatsonxProvider {
    /// Create a provider from configuration. Requires an API key and project.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let api_key = config.require_api_key()?.to_string();
        let project_id = config
            .project_id
            .clone()
            .ok_or_else(|| ConfigError::MissingEnvVar("IBM_PROJECT_ID".to_string()))?;

        Ok(Self {
            api_key,
            project_id,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            iam_url: IAM_TOKEN_URL.to_string(),
            model: config.model.clone(),
            decoding: config.decoding.clone(),
            client: http_client(config.timeout)?,
            token: Mutex::new(None),
        })
    }

    /// Point token exchange at a different IAM endpoint.
    pub fn with_iam_url(mut self, iam_url: impl Into<String>) -> Self {
        self.iam_url = iam_url.into();
        self
    }

    fn generation_url(&self) -> String {
        format!(
            "{}/ml/v1/text/generation?version={}",
            self.base_url, API_VERSION
        )
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> GenerationRequest<'a> {
        GenerationRequest {
            input: prompt,
            model_id: &self.model,
            project_id: &self.project_id,
            parameters: GenerationParameters {
                decoding_method: if self.decoding.greedy {
                    "greedy"
                } else {
                    "sample"
                },
                max_new_tokens: self.decoding.max_new_tokens,
                temperature: self.decoding.temperature,
                stop_sequences: &self.decoding.stop_sequences,
            },
        }
    }

    /// Return a valid bearer token, exchanging the API key if needed.
    ///
    /// The cache lock is never held across the IAM exchange, so one stalled
    /// refresh does not hold up other callers. Concurrent refreshes may race;
    /// the last one stored wins.
    async fn access_token(&self) -> Result<String, LlmError> {
        if let Some(token) = self.cached_token().await {
            return Ok(token);
        }

        let fresh = self.exchange_api_key().await?;
        let access_token = fresh.access_token.clone();
        *self.token.lock().await = Some(fresh);

        Ok(access_token)
    }

    async fn cached_token(&self) -> Option<String> {
        let cached = self.token.lock().await;
        cached
            .as_ref()
            .filter(|token| Instant::now() + TOKEN_REFRESH_MARGIN < token.expires_at)
            .map(|token| token.access_token.clone())
    }

    async fn exchange_api_key(&self) -> Result<CachedToken, LlmError> {
        let response = self
            .client
            .post(&self.iam_url)
            .header("accept", "application/json")
            .form(&[
                ("grant_type", "urn:ibm:params:oauth:grant-type:apikey"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiError {
                status,
                message: format!("IAM token exchange failed: {}", body),
            });
        }

        let token: IamTokenResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ParseError(e.to_string()))?;

        tracing::debug!(expires_in = token.expires_in, "Obtained IAM access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    input: &'a str,
    model_id: &'a str,
    project_id: &'a str,
    parameters: GenerationParameters<'a>,
}

#[derive(Debug, Serialize)]
struct GenerationParameters<'a> {
    decoding_method: &'static str,
    max_new_tokens: u32,
    temperature: f32,
    stop_sequences: &'a [String],
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    results: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct WatsonxErrorResponse {
    errors: Vec<WatsonxApiError>,
}

#[derive(Debug, Deserialize)]
struct WatsonxApiError {
    message: String,
}

fn parse_response(body: &str) -> Result<String, LlmError> {
    let response: GenerationResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError(e.to_string()))?;

    response
        .results
        .into_iter()
        .next()
        .map(|r| r.generated_text)
        .ok_or_else(|| LlmError::ParseError("No results in response".to_string()))
}

#[async_trait]
impl LlmProvider for WatsonxProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(self.generation_url())
            .bearer_auth(token)
            .header("accept", "application/json")
            .json(&self.build_request(prompt))
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
            let message = serde_json::from_str::<WatsonxErrorResponse>(&body)
                .ok()
                .and_then(|e| e.errors.into_iter().next())
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(LlmError::ApiError { status, message });
        }

        parse_response(&body)
    }

    /// A successful token exchange proves the key is valid and IAM reachable.
    async fn verify(&self) -> Result<(), LlmError> {
        self.access_token().await.map(|_| ())
    }

    fn provider_name(&self) -> &'static str {
        "watsonx"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
