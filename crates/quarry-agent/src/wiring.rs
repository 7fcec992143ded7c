//! Assembles a [`Pipeline`] from loaded settings.

use std::path::PathBuf;
use std::sync::Arc;

use quarry_memory::sqlite::ConnectionConfig;
use quarry_memory::{MemoryClient, SqliteMemory};
use quarry_pipeline::{ExecutorConfig, Pipeline, PipelineConfig, SqliteExecutor};
use quarry_settings::{MemorySettings, QuarrySettings};
use tracing::{info, warn};

use crate::paths;
use crate::provider_factory::build_provider;

/// Open the memory store, or a disabled client if memory is off or broken.
pub fn build_memory(settings: &MemorySettings) -> MemoryClient {
    if !settings.enabled {
        info!("memory disabled in settings");
        return MemoryClient::disabled();
    }

    let path = match paths::resolve_memory_db_path(&settings.db_path) {
        Ok(path) => path,
        Err(e) => {
            warn!(error = %e, "memory path unusable, continuing without memory");
            return MemoryClient::disabled();
        }
    };

    match SqliteMemory::open(&path.to_string_lossy(), &ConnectionConfig::default()) {
        Ok(store) => {
            info!(path = %path.display(), "memory store opened");
            MemoryClient::new(Arc::new(store), settings.recall_limit)
        }
        Err(e) => {
            warn!(
                error = %e,
                category = e.category(),
                path = %path.display(),
                "failed to open memory store, continuing without memory"
            );
            MemoryClient::disabled()
        }
    }
}

/// Build the full pipeline. `db_override` replaces the configured database.
pub fn build_pipeline(settings: &QuarrySettings, db_override: Option<PathBuf>) -> Pipeline {
    let db_path = paths::resolve_data_db_path(db_override, &settings.database.path);
    if !db_path.exists() {
        warn!(path = %db_path.display(), "analytical database not found; queries will fail");
    }

    let executor = SqliteExecutor::open(
        &db_path.to_string_lossy(),
        &ExecutorConfig {
            pool_size: settings.database.pool_size,
            busy_timeout_ms: settings.database.busy_timeout_ms,
            ..ExecutorConfig::default()
        },
    );

    Pipeline::builder(Arc::new(executor))
        .provider(build_provider(&settings.llm))
        .memory(build_memory(&settings.memory))
        .config(PipelineConfig::from_settings(settings))
        .build()
}
