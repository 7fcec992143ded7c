//! Schema migrations for the memory database.
//!
//! Applied versions are tracked in `schema_version`; re-running is a no-op.

use rusqlite::Connection;
use tracing::info;

use crate::errors::{MemoryError, Result};

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "memories table",
    sql: include_str!("v001_memories.sql"),
}];

/// Run all pending migrations. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
           version     INTEGER PRIMARY KEY,
           applied_at  TEXT    NOT NULL,
           description TEXT
         );",
    )
    .map_err(|e| MemoryError::Migration {
        message: format!("failed to create schema_version table: {e}"),
    })?;

    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| MemoryError::Migration {
            message: format!("failed to read schema_version: {e}"),
        })?;

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        info!(
            version = migration.version,
            description = migration.description,
            "applying memory migration"
        );
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| MemoryError::Migration {
                message: format!(
                    "migration v{} ({}) failed: {e}",
                    migration.version, migration.description
                ),
            })?;
        let _ = tx.execute(
            "INSERT INTO schema_version (version, applied_at, description) VALUES (?1, datetime('now'), ?2)",
            rusqlite::params![migration.version, migration.description],
        )?;
        tx.commit()?;
        applied += 1;
    }
    Ok(applied)
}
