//! Structured-output decoding.
//!
//! Generated JSON may be fenced, tagged, or surrounded by prose. Decoding
//! tries, in order: the first fenced block, the whole text, and the outermost
//! `{...}` span.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::sanitize::extract_fenced_block;

/// Why structured output could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Nothing to decode.
    #[error("empty output")]
    Empty,
    /// The text was not valid JSON of the expected shape.
    #[error("invalid structured output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of [`decode_or_default`].
#[derive(Debug)]
pub enum Decoded<T> {
    /// The output decoded cleanly.
    Parsed(T),
    /// Decoding failed and the default was substituted.
    Defaulted {
        /// The substituted value.
        value: T,
        /// Why decoding failed.
        error: DecodeError,
    },
}

/// Decode `raw` as `T`.
pub fn decode_structured<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let text = extract_fenced_block(raw).unwrap_or(raw).trim();
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(err) => match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if start < end => {
                serde_json::from_str(&text[start..=end]).map_err(|_| DecodeError::Json(err))
            }
            _ => Err(DecodeError::Json(err)),
        },
    }
}

/// Decode `raw` as `T`, substituting `default` on failure.
pub fn decode_or_default<T: DeserializeOwned>(raw: &str, default: T) -> Decoded<T> {
    match decode_structured(raw) {
        Ok(value) => Decoded::Parsed(value),
        Err(error) => {
            warn!(error = %error, "structured output rejected, using default");
            Decoded::Defaulted {
                value: default,
                error,
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
