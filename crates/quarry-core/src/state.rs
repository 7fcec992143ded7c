//! Pipeline state and response envelopes.
//!
//! A [`PipelineState`] is created per incoming question, handed by mutable
//! reference to each stage in turn, and dropped once the [`Response`] has been
//! produced. Nothing in it is shared between requests.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::AnswerError;
use crate::records::Record;

/// Status string carried by every [`FailureResponse`].
pub const FAILED_STATUS: &str = "failed";

/// An incoming question.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerRequest {
    /// Tenant the question belongs to.
    pub tenant_id: String,
    /// Acting user; memory reads and writes are scoped to it.
    pub user_id: String,
    /// Raw question text as typed.
    pub question: String,
    /// Prior conversation turns, oldest first.
    pub history: Vec<String>,
}

/// Mutable state threaded through every pipeline stage.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PipelineState {
    /// Tenant identifier.
    pub tenant_id: String,
    /// User identifier.
    pub user_id: String,
    /// Raw question.
    pub question: String,
    /// Question after normalization; `None` until the normalizer runs.
    pub corrected_question: Option<String>,
    /// Prior conversation turns, oldest first.
    pub history: Vec<String>,
    /// Tables the question touches. Order is irrelevant.
    pub entities: BTreeSet<String>,
    /// Query text; `None` until the vault or the synthesizer fills it.
    pub query: Option<String>,
    /// Whether the query and entities came from the vault.
    pub vault_hit: bool,
    /// Executed result rows.
    pub records: Vec<Record>,
    /// Final response; `None` until summarization.
    pub response: Option<Response>,
}

impl PipelineState {
    /// Create the state for one request.
    #[must_use]
    pub fn new(request: AnswerRequest) -> Self {
        Self {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            question: request.question,
            history: request.history,
            ..Self::default()
        }
    }

    /// The corrected question if normalization ran, else the raw question.
    pub fn effective_question(&self) -> &str {
        self.corrected_question.as_deref().unwrap_or(&self.question)
    }

    /// Replace the selected entities.
    pub fn set_entities<I, S>(&mut self, entities: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = entities.into_iter().map(Into::into).collect();
    }
}

/// Answer to a question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Headline numeric indicator. Always finite.
    pub headline_value: f64,
    /// Human-readable label of the headline indicator.
    pub headline_label: String,
    /// Secondary display indicators.
    pub secondary_indicators: BTreeMap<String, String>,
    /// Result rows the headline was computed from.
    pub records: Vec<Record>,
    /// Query text that produced the rows.
    pub query_text: String,
    /// Markdown narrative explaining the answer.
    pub narrative: String,
}

/// Structured failure returned to callers when execution fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    /// Error message.
    pub error: String,
    /// Always [`FAILED_STATUS`].
    pub status: String,
}

impl FailureResponse {
    /// Build a failure envelope from an error message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: FAILED_STATUS.to_string(),
        }
    }
}

impl From<&AnswerError> for FailureResponse {
    fn from(err: &AnswerError) -> Self {
        Self::new(err.to_string())
    }
}

/// What a caller hands back to its client: an answer or a structured failure.
///
/// An empty-but-successful answer is an [`AnswerReply::Answered`] with no
/// records, never a failure.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerReply {
    /// The pipeline produced a response.
    Answered(Response),
    /// Query execution failed.
    Failed(FailureResponse),
}

impl AnswerReply {
    /// Whether this reply is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<Response, AnswerError>> for AnswerReply {
    fn from(result: Result<Response, AnswerError>) -> Self {
        match result {
            Ok(response) => Self::Answered(response),
            Err(err) => Self::Failed(FailureResponse::from(&err)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
