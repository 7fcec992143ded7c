//! Database and memory store settings.

use serde::{Deserialize, Serialize};

/// Business database settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseSettings {
    /// Path to the `SQLite` database file.
    pub path: String,
    /// Connection pool size.
    pub pool_size: u32,
    /// Busy timeout in milliseconds.
    pub busy_timeout_ms: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "enterprise_bi_db.sqlite".to_string(),
            pool_size: 4,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Long-term memory settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemorySettings {
    /// Whether interactions are remembered. When disabled a no-op store is used.
    pub enabled: bool,
    /// Path to the memory database (relative paths resolve under `~/.quarry`).
    pub db_path: String,
    /// Maximum number of memories returned by a recall.
    pub recall_limit: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            db_path: "memory.db".to_string(),
            recall_limit: 5,
        }
    }
}
