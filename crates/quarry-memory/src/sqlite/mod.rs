//! `SQLite`-backed memory store.
//!
//! Recall ranks a user's most recent memories by how many distinct query
//! keywords each contains; ties keep newest first. A query with no keywords
//! returns the newest memories.

pub mod connection;
pub mod migrations;

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::errors::{MemoryError, Result};
use crate::store::{MemoryRecord, MemoryStore};

pub use connection::{ConnectionConfig, ConnectionPool};

/// How many recent memories recall scores.
const CANDIDATE_WINDOW: i64 = 500;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "was", "what", "with", "from", "are", "how", "our", "per", "all", "show",
    "user", "question", "insight",
];

fn keywords(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= 3 && !STOPWORDS.contains(w))
        .map(String::from)
        .collect()
}

/// Persistent memory store.
#[derive(Clone)]
pub struct SqliteMemory {
    pool: ConnectionPool,
}

impl SqliteMemory {
    /// Open (creating if needed) a memory database file.
    pub fn open(path: &str, config: &ConnectionConfig) -> Result<Self> {
        Self::from_pool(connection::new_file(path, config)?)
    }

    /// Open a throwaway in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::from_pool(connection::new_in_memory(&ConnectionConfig::default())?)
    }

    fn from_pool(pool: ConnectionPool) -> Result<Self> {
        {
            let conn = pool.get()?;
            let _ = migrations::run_migrations(&conn)?;
        }
        Ok(Self { pool })
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            f(&conn)
        })
        .await
        .map_err(|e| MemoryError::Internal(format!("memory task failed: {e}")))?
    }
}

fn insert(conn: &Connection, content: &str, user_id: &str) -> Result<()> {
    let id = uuid::Uuid::now_v7().to_string();
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    let _ = conn.execute(
        "INSERT INTO memories (id, user_id, content, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, user_id, content, created_at],
    )?;
    Ok(())
}

fn search(conn: &Connection, query: &str, user_id: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, content, created_at FROM memories
         WHERE user_id = ?1
         ORDER BY created_at DESC, rowid DESC
         LIMIT ?2",
    )?;
    let candidates = stmt
        .query_map(params![user_id, CANDIDATE_WINDOW], |row| {
            Ok(MemoryRecord {
                id: row.get(0)?,
                user_id: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let wanted = keywords(query);
    if wanted.is_empty() {
        return Ok(candidates.into_iter().take(limit).collect());
    }

    let mut scored: Vec<(usize, MemoryRecord)> = candidates
        .into_iter()
        .filter_map(|record| {
            let have = keywords(&record.content);
            let score = wanted.intersection(&have).count();
            (score > 0).then_some((score, record))
        })
        .collect();
    // stable: equal scores stay newest first
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    debug!(user_id, matches = scored.len(), "memory recall scored");
    Ok(scored.into_iter().take(limit).map(|(_, r)| r).collect())
}

#[async_trait]
impl MemoryStore for SqliteMemory {
    async fn record(&self, content: &str, user_id: &str) -> Result<()> {
        let content = content.to_string();
        let user_id = user_id.to_string();
        self.blocking(move |conn| insert(conn, &content, &user_id)).await
    }

    async fn recall(&self, query: &str, user_id: &str, limit: usize) -> Result<Vec<MemoryRecord>> {
        let query = query.to_string();
        let user_id = user_id.to_string();
        self.blocking(move |conn| search(conn, &query, &user_id, limit))
            .await
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
