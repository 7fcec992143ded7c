//! API error response parsing.
//!
//! Handles the error envelopes OpenAI-compatible servers return:
//! - Standard: `{"error": {"message": "...", "type": "...", "code": "..."}}`
//! - Detail:   `{"detail": "..."}`
//! - Flat:     `{"message": "...", "code": "..."}`

use serde_json::Value;

/// Parsed API error information.
pub struct ApiErrorInfo {
    /// Human-readable error message.
    pub message: String,
    /// Provider-specific error code (e.g., `"invalid_api_key"`).
    pub code: Option<String>,
}

/// Parse an API error response body into structured error info.
///
/// Tries the known envelopes in order, falling back to the raw body text.
pub fn parse_api_error(body: &str, status: u16) -> ApiErrorInfo {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = json["error"]["message"].as_str() {
            let code = json["error"]["code"]
                .as_str()
                .or_else(|| json["error"]["type"].as_str())
                .map(String::from);
            return ApiErrorInfo {
                message: msg.to_string(),
                code,
            };
        }

        if let Some(msg) = json["detail"].as_str().or_else(|| json["message"].as_str()) {
            let code = json["code"]
                .as_str()
                .or_else(|| json["type"].as_str())
                .map(String::from);
            return ApiErrorInfo {
                message: msg.to_string(),
                code,
            };
        }
    }

    ApiErrorInfo {
        message: format!("HTTP {status}: {body}"),
        code: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
