//! Pipeline controller.
//!
//! Runs the stages in order over one [`PipelineState`]:
//!
//! ```text
//! normalize ─┬─ vault hit ───────────────────────────┐
//!            └─ miss ── synthesize ── sanitize ──────┴── execute ── summarize
//! ```
//!
//! Every stage except execution absorbs its own failures. An execution error
//! is the only thing that escapes [`Pipeline::answer`].

use std::collections::BTreeMap;
use std::sync::Arc;

use quarry_core::{AnswerError, AnswerReply, AnswerRequest, PipelineState, Response, records};
use quarry_llm::Provider;
use quarry_memory::MemoryClient;
use quarry_settings::QuarrySettings;
use tracing::{Instrument, debug, error, info, info_span};

use crate::executor::QueryExecutor;
use crate::metrics::Summarizer;
use crate::normalizer::Normalizer;
use crate::sanitize::sanitize;
use crate::synthesizer::{SynthesisRequest, Synthesizer};
use crate::vault::Vault;

/// Controller tunables.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Table used when nothing better is known.
    pub default_table: String,
    /// Row limit of the sampling heuristic.
    pub sample_limit: u32,
    /// Static indicators attached to every response.
    pub secondary_indicators: BTreeMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_settings(&QuarrySettings::default())
    }
}

impl PipelineConfig {
    /// Pipeline tunables from loaded settings.
    pub fn from_settings(settings: &QuarrySettings) -> Self {
        Self {
            default_table: settings.pipeline.default_table.clone(),
            sample_limit: settings.pipeline.sample_limit,
            secondary_indicators: settings.pipeline.secondary_indicators.clone(),
        }
    }
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    executor: Arc<dyn QueryExecutor>,
    provider: Option<Arc<dyn Provider>>,
    memory: MemoryClient,
    vault: &'static Vault,
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Set the generative backend. `None` runs fully offline.
    #[must_use]
    pub fn provider(mut self, provider: Option<Arc<dyn Provider>>) -> Self {
        self.provider = provider;
        self
    }

    /// Set the memory client.
    #[must_use]
    pub fn memory(mut self, memory: MemoryClient) -> Self {
        self.memory = memory;
        self
    }

    /// Use a different vault than the built-in one.
    #[must_use]
    pub fn vault(mut self, vault: &'static Vault) -> Self {
        self.vault = vault;
        self
    }

    /// Set the tunables.
    #[must_use]
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Assemble the pipeline.
    pub fn build(self) -> Pipeline {
        let PipelineConfig {
            default_table,
            sample_limit,
            secondary_indicators,
        } = self.config;
        Pipeline {
            normalizer: Normalizer::new(
                self.vault,
                self.provider.clone(),
                self.memory.clone(),
                default_table.clone(),
            ),
            synthesizer: Synthesizer::new(self.vault, self.provider, default_table, sample_limit),
            executor: self.executor,
            summarizer: Summarizer::new(self.memory, secondary_indicators),
        }
    }
}

/// The question-to-answer pipeline.
pub struct Pipeline {
    normalizer: Normalizer,
    synthesizer: Synthesizer,
    executor: Arc<dyn QueryExecutor>,
    summarizer: Summarizer,
}

impl Pipeline {
    /// Start building a pipeline over `executor`.
    pub fn builder(executor: Arc<dyn QueryExecutor>) -> PipelineBuilder {
        PipelineBuilder {
            executor,
            provider: None,
            memory: MemoryClient::disabled(),
            vault: Vault::builtin(),
            config: PipelineConfig::default(),
        }
    }

    /// Answer one question.
    pub async fn answer(&self, request: AnswerRequest) -> Result<Response, AnswerError> {
        let span = info_span!(
            "answer",
            tenant_id = %request.tenant_id,
            user_id = %request.user_id,
        );
        self.run(PipelineState::new(request)).instrument(span).await
    }

    /// Answer one question, folding an execution failure into a
    /// [`FailureResponse`](quarry_core::FailureResponse).
    pub async fn reply(&self, request: AnswerRequest) -> AnswerReply {
        AnswerReply::from(self.answer(request).await)
    }

    async fn run(&self, mut state: PipelineState) -> Result<Response, AnswerError> {
        self.resolve_intent(&mut state).await;
        self.resolve_query(&mut state).await;
        self.execute(&mut state).await?;

        let response = self.summarizer.summarize(&mut state).await;
        info!(
            vault_hit = state.vault_hit,
            rows = response.records.len(),
            headline = %response.headline_label,
            "question answered"
        );
        Ok(response)
    }

    async fn resolve_intent(&self, state: &mut PipelineState) {
        let normalized = self
            .normalizer
            .normalize(&state.question, &state.history, &state.user_id)
            .await;
        state.set_entities(normalized.entities);
        state.corrected_question = Some(normalized.corrected_question);
        if let Some(query) = normalized.resolved_query {
            state.query = Some(query);
            state.vault_hit = true;
        }
    }

    async fn resolve_query(&self, state: &mut PipelineState) {
        if state.vault_hit {
            debug!("vault query in place, skipping synthesis");
            return;
        }
        let raw = self
            .synthesizer
            .synthesize(SynthesisRequest::from_state(state))
            .await;
        let mut query = sanitize(&raw);
        if query.is_empty() {
            debug!("sanitized query is empty, using heuristic");
            query = self.synthesizer.heuristic_query(state.effective_question());
        }
        state.query = Some(query);
    }

    async fn execute(&self, state: &mut PipelineState) -> Result<(), AnswerError> {
        let query = state.query.as_deref().unwrap_or_default();
        match self.executor.execute(query).await {
            Ok(rows) => {
                debug_assert!(records::is_uniform(&rows), "executor returned ragged rows");
                state.records = rows;
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    code = %e.code,
                    category = e.category(),
                    "query execution failed"
                );
                Err(AnswerError::from(e))
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
