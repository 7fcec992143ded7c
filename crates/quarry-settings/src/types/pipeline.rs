//! Pipeline behavior and logging settings.

use std::collections::BTreeMap;

use quarry_core::logging::LogFormat;
use serde::{Deserialize, Serialize};

/// Pipeline behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineSettings {
    /// Table used by the fallback entity list and the heuristic query.
    pub default_table: String,
    /// Row limit of the heuristic sample query.
    pub sample_limit: u32,
    /// Secondary indicators attached to every response.
    pub secondary_indicators: BTreeMap<String, String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            default_table: "sales".to_string(),
            sample_limit: 10,
            secondary_indicators: BTreeMap::from([
                ("growth".to_string(), "12.5%".to_string()),
                ("yoy".to_string(), "8.2%".to_string()),
            ]),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive (`RUST_LOG` wins when set).
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}
