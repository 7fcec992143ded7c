//! OpenAI-compatible chat completions provider.
//!
//! Sends one non-streaming `POST {base_url}/chat/completions` per call and
//! returns `choices[0].message.content`. Groq, `OpenAI` and most local
//! inference servers speak this format.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::error_parsing::parse_api_error;
use crate::provider::{ChatMessage, CompletionRequest, Provider, ProviderError, ProviderResult};

/// Provider configuration.
#[derive(Clone, Debug)]
pub struct OpenAiCompatConfig {
    /// Provider label for logging.
    pub provider: String,
    /// Model ID.
    pub model: String,
    /// API base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Bearer token.
    pub api_key: String,
    /// Default sampling temperature.
    pub temperature: f64,
    /// Default output token limit.
    pub max_tokens: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Chat completions provider for OpenAI-compatible endpoints.
pub struct OpenAiCompatProvider {
    config: OpenAiCompatConfig,
    /// HTTP client (reused across requests).
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider with its own HTTP client.
    pub fn new(config: OpenAiCompatConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: OpenAiCompatConfig, client: reqwest::Client) -> Self {
        info!(
            provider = %config.provider,
            model = %config.model,
            base_url = %config.base_url,
            "chat completions provider initialized"
        );
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn provider_type(&self) -> &str {
        &self.config.provider
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> ProviderResult<String> {
        let body = ChatCompletionBody {
            model: &self.config.model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            stream: false,
        };

        debug!(
            model = %self.config.model,
            message_count = request.messages.len(),
            max_tokens = body.max_tokens,
            "sending chat completion"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            let info = parse_api_error(&body_text, status.as_u16());
            error!(
                status = status.as_u16(),
                code = info.code.as_deref().unwrap_or("unknown"),
                "chat completion API error"
            );
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Auth {
                    message: info.message,
                },
                StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited {
                    message: info.message,
                },
                _ => ProviderError::Api {
                    status: status.as_u16(),
                    message: info.message,
                    code: info.code,
                },
            });
        }

        let text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Other {
                message: "chat completion returned no choices".into(),
            })?
            .message
            .content
            .unwrap_or_default();

        debug!(chars = content.len(), "chat completion received");
        Ok(content)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
