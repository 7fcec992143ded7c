//! # quarry-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`QuarrySettings::default()`]
//! 2. **User file**: `~/.quarry/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `QUARRY_*` overrides and the LLM credential
//!    variable (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, quarry_home, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<QuarrySettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.quarry/settings.json` with env var
/// overrides. If loading fails, returns compiled defaults.
pub fn get_settings() -> &'static QuarrySettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
pub fn init_settings(settings: QuarrySettings) -> std::result::Result<(), QuarrySettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        let settings = QuarrySettings::default();
        assert_eq!(settings.name, "quarry");
        assert_eq!(settings.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(settings.llm.api_key_env, "GROQ_API_KEY");
        assert!(settings.llm.api_key.is_none());
        assert_eq!(settings.database.path, "enterprise_bi_db.sqlite");
        assert_eq!(settings.pipeline.default_table, "sales");
        assert_eq!(settings.pipeline.sample_limit, 10);
        assert_eq!(settings.memory.recall_limit, 5);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn default_secondary_indicators() {
        let settings = QuarrySettings::default();
        let indicators = &settings.pipeline.secondary_indicators;
        assert_eq!(indicators.get("growth").map(String::as_str), Some("12.5%"));
        assert_eq!(indicators.get("yoy").map(String::as_str), Some("8.2%"));
    }
}
