//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`QuarrySettings::default()`]
//! 2. If `~/.quarry/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use quarry_core::logging::LogFormat;
use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::QuarrySettings;

/// Resolve the Quarry home directory (`~/.quarry`).
pub fn quarry_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".quarry")
}

/// Resolve the path to the settings file (`~/.quarry/settings.json`).
pub fn settings_path() -> PathBuf {
    quarry_home().join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<QuarrySettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// If the file does not exist, returns defaults. If the file contains
/// invalid JSON, returns an error.
pub fn load_settings_from_path(path: &Path) -> Result<QuarrySettings> {
    let mut settings = load_file_layers(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn load_file_layers(path: &Path) -> Result<QuarrySettings> {
    let defaults = serde_json::to_value(QuarrySettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Integers must be valid and within range, booleans accept
/// `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`. Invalid values are
/// ignored with a warning (falling back to file/default).
pub fn apply_env_overrides(settings: &mut QuarrySettings) {
    // ── Database ────────────────────────────────────────────────────
    if let Some(v) = read_env_string("QUARRY_DB_PATH") {
        settings.database.path = v;
    }

    // ── Memory ──────────────────────────────────────────────────────
    if let Some(v) = read_env_string("QUARRY_MEMORY_DB") {
        settings.memory.db_path = v;
    }
    if let Some(v) = read_env_bool("QUARRY_MEMORY_ENABLED") {
        settings.memory.enabled = v;
    }

    // ── LLM ─────────────────────────────────────────────────────────
    if let Some(v) = read_env_string("QUARRY_LLM_MODEL") {
        settings.llm.model = v;
    }
    if let Some(v) = read_env_string("QUARRY_LLM_BASE_URL") {
        settings.llm.base_url = v;
    }
    if let Some(v) = read_env_u64("QUARRY_LLM_TIMEOUT_MS", 1_000, 600_000) {
        settings.llm.timeout_ms = v;
    }
    if settings.llm.api_key.is_none() {
        settings.llm.api_key = read_env_string(&settings.llm.api_key_env);
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = read_env_string("QUARRY_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = read_env_log_format("QUARRY_LOG_FORMAT") {
        settings.logging.format = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_bool(name: &str) -> Option<bool> {
    let val = std::env::var(name).ok()?;
    let result = parse_bool(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

fn read_env_log_format(name: &str) -> Option<LogFormat> {
    let val = std::env::var(name).ok()?;
    let result = LogFormat::parse(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid log format env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SettingsError;

    // ── deep_merge ──────────────────────────────────────────────────

    #[test]
    fn merge_nested_override() {
        let target = serde_json::json!({
            "database": {"path": "a.sqlite", "poolSize": 4}
        });
        let source = serde_json::json!({
            "database": {"path": "b.sqlite"}
        });
        let merged = deep_merge(target, source);
        assert_eq!(merged["database"]["path"], "b.sqlite");
        assert_eq!(merged["database"]["poolSize"], 4);
    }

    #[test]
    fn merge_null_preserves_target() {
        let target = serde_json::json!({"a": 1, "b": 2});
        let source = serde_json::json!({"a": null});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    #[test]
    fn merge_array_replace() {
        let target = serde_json::json!({"items": [1, 2, 3]});
        let source = serde_json::json!({"items": [4, 5]});
        let merged = deep_merge(target, source);
        assert_eq!(merged["items"], serde_json::json!([4, 5]));
    }

    #[test]
    fn merge_primitive_replaces_object() {
        let target = serde_json::json!({"a": {"nested": true}});
        let source = serde_json::json!({"a": 42});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 42);
    }

    #[test]
    fn merge_new_keys_added() {
        let target = serde_json::json!({"a": 1});
        let source = serde_json::json!({"b": 2});
        let merged = deep_merge(target, source);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 2);
    }

    // ── file layers ─────────────────────────────────────────────────

    #[test]
    fn load_missing_file_returns_defaults() {
        let settings = load_file_layers(Path::new("/nonexistent/settings.json")).unwrap();
        let defaults = QuarrySettings::default();
        assert_eq!(settings.version, defaults.version);
        assert_eq!(settings.database.path, defaults.database.path);
    }

    #[test]
    fn load_partial_json_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"database": {"poolSize": 8}, "pipeline": {"defaultTable": "orders"}}"#,
        )
        .unwrap();

        let settings = load_file_layers(&path).unwrap();
        assert_eq!(settings.database.pool_size, 8);
        assert_eq!(settings.pipeline.default_table, "orders");
        assert_eq!(settings.pipeline.sample_limit, 10);
        assert_eq!(settings.database.busy_timeout_ms, 5_000);
    }

    #[test]
    fn load_indicators_are_merged_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"pipeline": {"secondaryIndicators": {"growth": "3.1%", "churn": "2%"}}}"#,
        )
        .unwrap();

        let settings = load_file_layers(&path).unwrap();
        let indicators = &settings.pipeline.secondary_indicators;
        assert_eq!(indicators.get("growth").map(String::as_str), Some("3.1%"));
        assert_eq!(indicators.get("yoy").map(String::as_str), Some("8.2%"));
        assert_eq!(indicators.get("churn").map(String::as_str), Some("2%"));
    }

    #[test]
    fn load_log_format_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"logging": {"format": "json"}}"#).unwrap();

        let settings = load_file_layers(&path).unwrap();
        assert_eq!(settings.logging.format, LogFormat::Json);
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn load_invalid_json_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json").unwrap();

        let result = load_settings_from_path(&path);
        assert!(matches!(result, Err(SettingsError::Json(_))));
    }

    #[test]
    fn settings_path_under_quarry_home() {
        let path = settings_path();
        assert!(path.ends_with(".quarry/settings.json"));
    }

    // ── parse_bool ──────────────────────────────────────────────────

    #[test]
    fn parse_bool_true_variants() {
        for val in &["true", "1", "yes", "on", "TRUE", "Yes", "ON"] {
            assert_eq!(parse_bool(val), Some(true), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_false_variants() {
        for val in &["false", "0", "no", "off", "FALSE", "No", "OFF"] {
            assert_eq!(parse_bool(val), Some(false), "failed for {val}");
        }
    }

    #[test]
    fn parse_bool_invalid() {
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    // ── parse_u64_range ─────────────────────────────────────────────

    #[test]
    fn parse_u64_valid() {
        assert_eq!(parse_u64_range("30000", 1_000, 600_000), Some(30_000));
        assert_eq!(parse_u64_range("1000", 1_000, 600_000), Some(1_000));
    }

    #[test]
    fn parse_u64_out_of_range() {
        assert_eq!(parse_u64_range("500", 1_000, 600_000), None);
        assert_eq!(parse_u64_range("700000", 1_000, 600_000), None);
    }

    #[test]
    fn parse_u64_invalid() {
        assert_eq!(parse_u64_range("abc", 1_000, 600_000), None);
    }
}
