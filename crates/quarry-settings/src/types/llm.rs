//! Generative backend settings.

use serde::{Deserialize, Serialize};

/// Settings for the OpenAI-compatible chat completions backend.
///
/// The backend is only used when a valid credential is available; see
/// `quarry_llm::resolve_api_key`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// Provider label, used for logging.
    pub provider: String,
    /// Model identifier.
    pub model: String,
    /// API base URL (the `/chat/completions` path is appended).
    pub base_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// API key, usually filled from [`api_key_env`](Self::api_key_env).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate per call.
    pub max_tokens: u32,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "groq".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            temperature: 0.0,
            max_tokens: 1024,
            timeout_ms: 30_000,
        }
    }
}
