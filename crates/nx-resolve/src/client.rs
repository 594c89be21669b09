//! The external model client.
//!
//! A thin chat-completions client with a bounded timeout. "Model
//! unavailable" is an ordinary value here, not control flow: every failure
//! mode - transport error, non-success status, empty or malformed reply -
//! comes back as a [`ClientError`], and the resolver's explicit fallback
//! branch takes over. Nothing in this module retries or blocks past the
//! configured timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the chat-completions endpoint URL.
pub const ENV_ENDPOINT: &str = "NEXUS_MODEL_ENDPOINT";
/// Environment variable holding the bearer token, if the endpoint needs one.
pub const ENV_API_KEY: &str = "NEXUS_MODEL_API_KEY";
/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "NEXUS_MODEL_NAME";
/// Environment variable overriding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "NEXUS_MODEL_TIMEOUT_MS";

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection settings for the model endpoint.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Model name sent in the request.
    pub model: String,
    /// Hard ceiling on each request.
    pub timeout: Duration,
    /// Token budget for the reply.
    pub max_tokens: u32,
    /// Sampling temperature. Low - command mapping wants determinism.
    pub temperature: f32,
}

impl ModelConfig {
    /// A config for the given endpoint with defaults for everything else.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_tokens: 200,
            temperature: 0.1,
        }
    }

    /// Read config from the environment. `None` when no endpoint is set -
    /// the resolver then runs heuristics-only.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(ENV_ENDPOINT).ok()?;
        if endpoint.trim().is_empty() {
            return None;
        }
        let mut config = Self::new(endpoint);
        if let Ok(key) = std::env::var(ENV_API_KEY)
            && !key.is_empty()
        {
            config.api_key = Some(key);
        }
        if let Ok(model) = std::env::var(ENV_MODEL)
            && !model.is_empty()
        {
            config.model = model;
        }
        if let Ok(ms) = std::env::var(ENV_TIMEOUT_MS)
            && let Ok(ms) = ms.parse::<u64>()
        {
            config.timeout = Duration::from_millis(ms.max(1));
        }
        Some(config)
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Why a model call produced no usable reply.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, or timeout failure.
    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("model endpoint returned {0}")]
    Status(reqwest::StatusCode),

    /// The reply carried no message content.
    #[error("model reply was empty")]
    EmptyReply,

    /// The reply content did not parse as the expected JSON shape.
    #[error("malformed model reply: {0}")]
    MalformedReply(#[from] serde_json::Error),
}

/// One message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    /// `"system"`, `"user"`, or `"assistant"`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl WireMessage {
    /// Build a wire message.
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [WireMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

/// The parsed reply shape the model must produce.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelReply {
    /// The structured command string.
    pub command: String,
    /// Model-reported confidence in `[0, 1]`.
    pub confidence: f64,
    /// Brief explanation of the mapping.
    pub explanation: String,
    /// Whether the model wants the user to clarify first.
    #[serde(default, rename = "needsClarification")]
    pub needs_clarification: bool,
    /// The clarification question, when one is needed.
    #[serde(default, rename = "clarificationPrompt")]
    pub clarification_prompt: Option<String>,
}

/// An HTTP client bound to one model endpoint.
#[derive(Debug, Clone)]
pub struct ModelClient {
    config: ModelConfig,
    http: reqwest::Client,
}

impl ModelClient {
    /// Build a client. The timeout is baked into the underlying HTTP client
    /// so no request can outlive it.
    pub fn new(config: ModelConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// Submit the message list and parse the reply.
    ///
    /// Returns the parsed reply plus the raw content string, which the
    /// resolver appends verbatim to session history.
    pub async fn complete(
        &self,
        messages: &[WireMessage],
    ) -> Result<(ModelReply, String), ClientError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let mut builder = self.http.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(ClientError::EmptyReply)?;
        if content.trim().is_empty() {
            return Err(ClientError::EmptyReply);
        }

        let reply: ModelReply = serde_json::from_str(&content)?;
        Ok((reply, content))
    }
}
