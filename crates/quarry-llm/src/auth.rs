//! Credential validation.

/// Placeholder value shipped in sample environment files.
pub const PLACEHOLDER_API_KEY: &str = "your_groq_key";

/// Return the key if it is usable.
///
/// Empty, whitespace-only and placeholder keys are rejected, in which case the
/// caller runs without a generative backend.
pub fn resolve_api_key(candidate: Option<&str>) -> Option<String> {
    let key = candidate?.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return None;
    }
    Some(key.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
