//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a settings
//! file may contain any subset of fields; missing fields get their default.

mod llm;
mod pipeline;
mod storage;

pub use llm::*;
pub use pipeline::*;
pub use storage::*;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// # JSON Format
///
/// ```json
/// {
///   "llm": { "model": "llama-3.3-70b-versatile" },
///   "database": { "path": "/srv/bi/enterprise.sqlite" },
///   "logging": { "level": "info", "format": "json" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuarrySettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// Generative backend settings.
    pub llm: LlmSettings,
    /// Business database the executor runs queries against.
    pub database: DatabaseSettings,
    /// Long-term memory store.
    pub memory: MemorySettings,
    /// Pipeline behavior.
    pub pipeline: PipelineSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for QuarrySettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "quarry".to_string(),
            llm: LlmSettings::default(),
            database: DatabaseSettings::default(),
            memory: MemorySettings::default(),
            pipeline: PipelineSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
