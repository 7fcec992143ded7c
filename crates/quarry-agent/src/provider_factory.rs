//! Generative backend construction from settings.
//!
//! A missing, blank or placeholder credential is not an error: no provider is
//! built and the pipeline runs on its deterministic fallbacks.

use std::sync::Arc;
use std::time::Duration;

use quarry_llm::{OpenAiCompatConfig, OpenAiCompatProvider, Provider, resolve_api_key};
use quarry_settings::LlmSettings;
use tracing::{info, warn};

/// Providers that speak the OpenAI chat completions format.
const OPENAI_COMPATIBLE: &[&str] = &["groq", "openai", "openai-compatible"];

/// Build the configured provider, or `None` to run offline.
pub fn build_provider(settings: &LlmSettings) -> Option<Arc<dyn Provider>> {
    let provider = settings.provider.to_lowercase();
    if !OPENAI_COMPATIBLE.contains(&provider.as_str()) {
        warn!(provider = %settings.provider, "unsupported provider, running offline");
        return None;
    }

    let Some(api_key) = resolve_api_key(settings.api_key.as_deref()) else {
        info!(
            env = %settings.api_key_env,
            "no usable API key, generative stages will use fallbacks"
        );
        return None;
    };

    let config = OpenAiCompatConfig {
        provider,
        model: settings.model.clone(),
        base_url: settings.base_url.clone(),
        api_key,
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
        timeout: Duration::from_millis(settings.timeout_ms),
    };

    match OpenAiCompatProvider::new(config) {
        Ok(p) => Some(Arc::new(p)),
        Err(e) => {
            warn!(error = %e, category = e.category(), "failed to build provider, running offline");
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
