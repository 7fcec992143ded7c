//! Query synthesizer.
//!
//! Produces query text for the normalized question. An existing query (from a
//! vault hit) is returned untouched. Otherwise the vault is consulted once more
//! on the raw question, then the generative backend is asked, and finally a
//! keyword heuristic over the default table fills in.
//!
//! Output here is raw; the controller runs it through
//! [`sanitize`](crate::sanitize::sanitize) before execution.

use std::sync::Arc;

use quarry_core::PipelineState;
use quarry_llm::{CompletionRequest, Provider};
use tracing::{debug, warn};

use crate::prompts;
use crate::vault::Vault;

/// Words that make the heuristic select every row instead of a sample.
const FULL_SCAN_KEYWORDS: &[&str] = &["revenue", "sales"];

/// Inputs to one synthesis.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisRequest<'a> {
    /// Raw question, used for the vault re-check.
    pub question: &'a str,
    /// Normalized question, used for prompting and the heuristic.
    pub corrected_question: &'a str,
    /// Prior conversation turns.
    pub history: &'a [String],
    /// Query already resolved by the vault.
    pub existing_query: Option<&'a str>,
}

/// Query synthesizer stage.
pub struct Synthesizer {
    vault: &'static Vault,
    provider: Option<Arc<dyn Provider>>,
    default_table: String,
    sample_limit: u32,
}

impl Synthesizer {
    /// Create a synthesizer.
    pub fn new(
        vault: &'static Vault,
        provider: Option<Arc<dyn Provider>>,
        default_table: impl Into<String>,
        sample_limit: u32,
    ) -> Self {
        Self {
            vault,
            provider,
            default_table: default_table.into(),
            sample_limit,
        }
    }

    /// Produce raw query text. Never fails; never returns blank text.
    pub async fn synthesize(&self, request: SynthesisRequest<'_>) -> String {
        if let Some(existing) = request.existing_query {
            return existing.to_string();
        }

        if let Some(entry) = self.vault.lookup(request.question) {
            debug!(matched = %entry.question, "vault hit during synthesis");
            return entry.query.clone();
        }

        let Some(provider) = &self.provider else {
            debug!("no generative backend, using heuristic query");
            return self.heuristic_query(request.corrected_question);
        };

        let completion = CompletionRequest::from_prompt(prompts::synthesizer_user(
            request.corrected_question,
            request.history,
        ))
        .with_system(prompts::synthesizer_system());

        match provider.complete(&completion).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!(provider = provider.provider_type(), "backend returned no query, using heuristic");
                self.heuristic_query(request.corrected_question)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    provider = provider.provider_type(),
                    "synthesizer backend call failed, using heuristic"
                );
                self.heuristic_query(request.corrected_question)
            }
        }
    }

    /// Keyword heuristic over the default table.
    ///
    /// Revenue and sales questions read the whole table; anything else reads a
    /// bounded sample.
    pub fn heuristic_query(&self, question: &str) -> String {
        let table = &self.default_table;
        let lowered = question.to_lowercase();
        if FULL_SCAN_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            format!("SELECT * FROM {table}")
        } else {
            format!("SELECT * FROM {table} LIMIT {}", self.sample_limit)
        }
    }
}

impl<'a> SynthesisRequest<'a> {
    /// Borrow the synthesis inputs from pipeline state.
    pub fn from_state(state: &'a PipelineState) -> Self {
        Self {
            question: &state.question,
            corrected_question: state.effective_question(),
            history: &state.history,
            existing_query: state.query.as_deref(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
