//! `SQLite` query executor.
//!
//! Connections are opened read-only and pinned with `query_only`, so a
//! generated statement can never modify the analytical data. Pool
//! construction is lazy: a missing or unreadable file surfaces as a
//! connect-stage [`ExecutionError`] on the first query, not at startup.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use quarry_core::{ExecutionError, ExecutionStage, Record};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde_json::{Number, Value};
use tracing::{debug, instrument};

use super::QueryExecutor;

/// Executor pool settings.
#[derive(Clone, Debug)]
pub struct ExecutorConfig {
    /// Maximum pool size (default: 4).
    pub pool_size: u32,
    /// Busy timeout in milliseconds (default: 5000).
    pub busy_timeout_ms: u32,
    /// How long to wait for a connection (default: 5s).
    pub connect_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            pool_size: 4,
            busy_timeout_ms: 5_000,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
struct ReadOnlyCustomizer {
    busy_timeout_ms: u32,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ReadOnlyCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};\
             PRAGMA query_only = ON;",
            self.busy_timeout_ms
        ))
    }
}

/// Query executor over a `SQLite` database file.
#[derive(Clone)]
pub struct SqliteExecutor {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteExecutor {
    /// Point an executor at the database file at `path`.
    pub fn open(path: &str, config: &ExecutorConfig) -> Self {
        let manager = SqliteConnectionManager::file(path).with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        );
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .min_idle(Some(0))
            .connection_timeout(config.connect_timeout)
            .connection_customizer(Box::new(ReadOnlyCustomizer {
                busy_timeout_ms: config.busy_timeout_ms,
            }))
            .build_unchecked(manager);
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    #[instrument(skip_all, fields(query_len = query.len()))]
    async fn execute(&self, query: &str) -> Result<Vec<Record>, ExecutionError> {
        let started = Instant::now();
        let pool = self.pool.clone();
        let owned = query.to_string();
        let records = tokio::task::spawn_blocking(move || run_query(&pool, &owned))
            .await
            .map_err(|e| {
                ExecutionError::new(ExecutionStage::Worker, format!("query worker failed: {e}"))
            })?
            .map_err(|e| e.with_query(query))?;

        #[allow(clippy::cast_possible_truncation)]
        let elapsed_ms = started.elapsed().as_millis() as u64;
        debug!(rows = records.len(), elapsed_ms, "query executed");
        Ok(records)
    }
}

fn run_query(
    pool: &Pool<SqliteConnectionManager>,
    query: &str,
) -> Result<Vec<Record>, ExecutionError> {
    let conn = pool
        .get()
        .map_err(|e| ExecutionError::new(ExecutionStage::Connect, e.to_string()).with_source(e))?;
    let mut stmt = conn
        .prepare(query)
        .map_err(|e| ExecutionError::new(ExecutionStage::Prepare, e.to_string()).with_source(e))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let fetch = |e: rusqlite::Error| {
        ExecutionError::new(ExecutionStage::Fetch, e.to_string()).with_source(e)
    };

    let mut rows = stmt.query([]).map_err(fetch)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(fetch)? {
        let mut record = Record::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            let value = row.get_ref(i).map_err(fetch)?;
            let _ = record.insert(name.clone(), to_json(value));
        }
        records.push(record);
    }
    Ok(records)
}

/// Map a `SQLite` value onto a JSON scalar.
///
/// Non-finite reals become `null`; blobs are base64 text.
fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::String(STANDARD.encode(bytes)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn seeded() -> (tempfile::TempDir, SqliteExecutor) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bi.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE sales (sale_id INTEGER, region TEXT, revenue REAL, note BLOB);
             INSERT INTO sales VALUES (1, 'North', 100.5, x'01ff');
             INSERT INTO sales VALUES (2, 'South', NULL, NULL);",
        )
        .unwrap();
        drop(conn);
        let executor = SqliteExecutor::open(path.to_str().unwrap(), &ExecutorConfig::default());
        (dir, executor)
    }

    fn quick() -> ExecutorConfig {
        ExecutorConfig {
            connect_timeout: Duration::from_millis(200),
            ..ExecutorConfig::default()
        }
    }

    #[tokio::test]
    async fn rows_keep_column_order_and_types() {
        let (_dir, executor) = seeded();
        let rows = executor
            .execute("SELECT region, revenue, sale_id, note FROM sales ORDER BY sale_id")
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["region", "revenue", "sale_id", "note"]);
        assert_eq!(rows[0]["revenue"], json!(100.5));
        assert_eq!(rows[0]["sale_id"], json!(1));
        assert_eq!(rows[0]["note"], json!("Af8="));
        assert_eq!(rows[1]["revenue"], Value::Null);
    }

    #[tokio::test]
    async fn empty_result_is_success() {
        let (_dir, executor) = seeded();
        let rows = executor
            .execute("SELECT * FROM sales WHERE region = 'Mars'")
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unknown_table_is_prepare_error() {
        let (_dir, executor) = seeded();
        let err = executor.execute("SELECT * FROM nope").await.unwrap_err();
        assert_eq!(err.stage, ExecutionStage::Prepare);
        assert_eq!(err.code, "EXECUTION_PREPARE_ERROR");
        assert_eq!(err.query.as_deref(), Some("SELECT * FROM nope"));
    }

    #[tokio::test]
    async fn writes_are_rejected() {
        let (_dir, executor) = seeded();
        let result = executor.execute("DELETE FROM sales").await;
        assert_matches!(result, Err(ExecutionError { .. }));
        let rows = executor.execute("SELECT * FROM sales").await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_connect_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.sqlite");
        let executor = SqliteExecutor::open(path.to_str().unwrap(), &quick());
        let err = executor.execute("SELECT 1").await.unwrap_err();
        assert_eq!(err.stage, ExecutionStage::Connect);
        assert_eq!(err.category(), "unavailable");
        assert!(!path.exists());
    }

    #[test]
    fn non_finite_real_is_null() {
        assert_eq!(to_json(ValueRef::Real(f64::NAN)), Value::Null);
        assert_eq!(to_json(ValueRef::Integer(-3)), json!(-3));
        assert_eq!(to_json(ValueRef::Text(b"hi")), json!("hi"));
    }
}
