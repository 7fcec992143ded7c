//! Query execution.
//!
//! The pipeline only sees [`QueryExecutor`]; [`SqliteExecutor`] is the
//! production implementation over the analytical `SQLite` file.

pub mod sqlite;

use async_trait::async_trait;
use quarry_core::{ExecutionError, Record};

pub use sqlite::{ExecutorConfig, SqliteExecutor};

/// Runs finalized query text against the analytical store.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute `query` and return every result row in column order.
    ///
    /// Zero rows is a success. Any data-access failure is an
    /// [`ExecutionError`] carrying the query text.
    async fn execute(&self, query: &str) -> Result<Vec<Record>, ExecutionError>;
}
