//! Generation-service configuration from environment variables.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default watsonx.ai regional endpoint.
pub const DEFAULT_WATSONX_URL: &str = "https://us-south.ml.cloud.ibm.com";

/// Default watsonx.ai foundation model.
pub const DEFAULT_WATSONX_MODEL: &str = "ibm/granite-13b-chat-v2";

/// Default Anthropic API base URL.
pub const DEFAULT_CLAUDE_URL: &str = "https://api.anthropic.com";

/// Default Claude model.
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-haiku-20241022";

pub const DEFAULT_MAX_NEW_TOKENS: u32 = 400;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Generation stops at the first blank line by default.
pub const DEFAULT_STOP_SEQUENCE: &str = "\n\n";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Watsonx,
    Claude,
    Fake,
    /// Generation explicitly turned off; always use the fallback.
    Disabled,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_lowercase().as_str() {
            "watsonx" => Ok(ProviderKind::Watsonx),
            "claude" => Ok(ProviderKind::Claude),
            "fake" => Ok(ProviderKind::Fake),
            "none" | "off" | "disabled" => Ok(ProviderKind::Disabled),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Watsonx => "watsonx",
            ProviderKind::Claude => "claude",
            ProviderKind::Fake => "fake",
            ProviderKind::Disabled => "none",
        }
    }
}

/// Decoding parameters passed through to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingParams {
    /// Greedy decoding; otherwise sampling.
    pub greedy: bool,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub stop_sequences: Vec<String>,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            greedy: true,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            stop_sequences: vec![DEFAULT_STOP_SEQUENCE.to_string()],
        }
    }
}

/// Text-generation provider configuration.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// API key for the selected provider, if one was supplied.
    pub api_key: Option<String>,
    /// watsonx.ai project the model runs under.
    pub project_id: Option<String>,
    pub base_url: String,
    pub model: String,
    pub decoding: DecodingParams,
    /// Client-side request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PANTRY_AI_PROVIDER`: "watsonx" | "claude" | "fake" | "none" (default: "watsonx")
    /// - `IBM_API_KEY`, `IBM_PROJECT_ID`: watsonx credentials
    /// - `ANTHROPIC_API_KEY`: Claude credentials
    /// - `PANTRY_AI_URL`, `PANTRY_AI_MODEL`: override endpoint and model
    /// - `PANTRY_AI_MAX_TOKENS`, `PANTRY_AI_TEMPERATURE`: decoding limits
    /// - `PANTRY_AI_STOP_SEQUENCES`: JSON array of stop strings
    /// - `PANTRY_AI_SAMPLING`: "true" to sample instead of greedy decoding
    /// - `PANTRY_AI_TIMEOUT_SECS`: HTTP timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`ProviderConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kind = match lookup("PANTRY_AI_PROVIDER") {
            Some(value) => ProviderKind::parse(&value)?,
            None => ProviderKind::Watsonx,
        };

        let (api_key, default_url, default_model) = match kind {
            ProviderKind::Watsonx => (lookup("IBM_API_KEY"), DEFAULT_WATSONX_URL, DEFAULT_WATSONX_MODEL),
            ProviderKind::Claude => (lookup("ANTHROPIC_API_KEY"), DEFAULT_CLAUDE_URL, DEFAULT_CLAUDE_MODEL),
            ProviderKind::Fake | ProviderKind::Disabled => (None, "", "fake-model"),
        };

        let base_url = lookup("PANTRY_AI_URL").unwrap_or_else(|| default_url.to_string());
        let model = lookup("PANTRY_AI_MODEL").unwrap_or_else(|| default_model.to_string());

        let mut decoding = DecodingParams::default();
        if let Some(value) = lookup("PANTRY_AI_MAX_TOKENS") {
            decoding.max_new_tokens = parse_value("PANTRY_AI_MAX_TOKENS", &value)?;
        }
        if let Some(value) = lookup("PANTRY_AI_TEMPERATURE") {
            decoding.temperature = parse_value("PANTRY_AI_TEMPERATURE", &value)?;
        }
        if let Some(value) = lookup("PANTRY_AI_STOP_SEQUENCES") {
            decoding.stop_sequences =
                serde_json::from_str(&value).map_err(|_| ConfigError::InvalidValue {
                    name: "PANTRY_AI_STOP_SEQUENCES".to_string(),
                    value,
                })?;
        }
        if let Some(value) = lookup("PANTRY_AI_SAMPLING") {
            decoding.greedy = !(value == "true" || value == "1");
        }

        let timeout = lookup("PANTRY_AI_TIMEOUT_SECS")
            .map(|value| parse_value::<u64>("PANTRY_AI_TIMEOUT_SECS", &value))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            kind,
            api_key: api_key.filter(|key| !key.is_empty()),
            project_id: lookup("IBM_PROJECT_ID").filter(|id| !id.is_empty()),
            base_url,
            model,
            decoding,
            timeout,
        })
    }

    /// The API key, or the name of the variable that should have held it.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or_else(|| {
            let name = match self.kind {
                ProviderKind::Claude => "ANTHROPIC_API_KEY",
                _ => "IBM_API_KEY",
            };
            ConfigError::MissingEnvVar(name.to_string())
        })
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}
