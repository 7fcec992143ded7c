//! Error hierarchy for the answer pipeline.
//!
//! Memory failures, generative-backend failures and metric cast failures are
//! absorbed by the stage that hits them. The only error a caller ever sees is
//! a data-access failure raised while executing the finalized query:
//!
//! - [`ExecutionError`]: the executor could not run the query
//! - [`AnswerError`]: the top-level error returned by the pipeline controller

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// ExecutionError
// ─────────────────────────────────────────────────────────────────────────────

/// Phase of query execution that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStage {
    /// Acquiring a connection to the data store.
    Connect,
    /// Compiling the query text.
    Prepare,
    /// Stepping through result rows.
    Fetch,
    /// The blocking worker running the query died.
    Worker,
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect => write!(f, "connect"),
            Self::Prepare => write!(f, "prepare"),
            Self::Fetch => write!(f, "fetch"),
            Self::Worker => write!(f, "worker"),
        }
    }
}

/// Data-access failure raised by a query executor.
#[derive(Debug, Error)]
#[error("Query execution failed during {stage}: {message}")]
pub struct ExecutionError {
    /// Phase that failed.
    pub stage: ExecutionStage,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code.
    pub code: String,
    /// Query text that was being executed.
    pub query: Option<String>,
    /// Original cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ExecutionError {
    /// Create a new execution error.
    #[must_use]
    pub fn new(stage: ExecutionStage, message: impl Into<String>) -> Self {
        let stage_upper = stage.to_string().to_uppercase();
        Self {
            stage,
            message: message.into(),
            code: format!("EXECUTION_{stage_upper}_ERROR"),
            query: None,
            source: None,
        }
    }

    /// Attach the query text that failed.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the error cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Error category string for logging.
    pub fn category(&self) -> &str {
        match self.stage {
            ExecutionStage::Connect => "unavailable",
            ExecutionStage::Prepare => "invalid_query",
            ExecutionStage::Fetch => "data",
            ExecutionStage::Worker => "internal",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AnswerError
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned by the pipeline controller.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The finalized query could not be executed.
    #[error("{0}")]
    Execution(#[from] ExecutionError),
}

impl AnswerError {
    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Execution(e) => &e.code,
        }
    }

    /// Error category string for logging.
    pub fn category(&self) -> &str {
        match self {
            Self::Execution(e) => e.category(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
