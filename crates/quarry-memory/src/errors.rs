//! Error types for the memory subsystem.

use thiserror::Error;

/// Errors that can occur during memory store operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// `SQLite` database error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Schema migration failed.
    #[error("migration error: {message}")]
    Migration {
        /// Describes which migration failed and why.
        message: String,
    },

    /// Internal error (e.g. a blocking task panicked).
    #[error("internal error: {0}")]
    Internal(String),
}

impl MemoryError {
    /// Error category string for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Sqlite(_) | Self::Migration { .. } => "storage",
            Self::Pool(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }
}

/// Convenience type alias for memory results.
pub type Result<T> = std::result::Result<T, MemoryError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
