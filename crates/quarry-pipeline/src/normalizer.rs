//! Intent normalizer.
//!
//! Turns a raw, possibly misspelled or fragmentary question into a corrected
//! question and the tables it touches. A vault hit short-circuits everything
//! and also hands back the curated query. Without a backend, or when the
//! backend fails or answers with garbage, the question passes through
//! unchanged and the default table is selected.

use std::sync::Arc;

use quarry_llm::{CompletionRequest, Provider};
use quarry_memory::MemoryClient;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::decode::{Decoded, decode_or_default};
use crate::prompts;
use crate::schema;
use crate::vault::Vault;

/// Result of normalization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    /// Corrected question (the input itself on fallback or vault hit).
    pub corrected_question: String,
    /// Selected tables; never empty.
    pub entities: Vec<String>,
    /// Query supplied by a vault hit.
    pub resolved_query: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RouterOutput {
    #[serde(default)]
    corrected_question: Option<String>,
    #[serde(default)]
    tables: Option<Vec<String>>,
}

/// Intent normalizer stage.
pub struct Normalizer {
    vault: &'static Vault,
    provider: Option<Arc<dyn Provider>>,
    memory: MemoryClient,
    default_table: String,
}

impl Normalizer {
    /// Create a normalizer.
    pub fn new(
        vault: &'static Vault,
        provider: Option<Arc<dyn Provider>>,
        memory: MemoryClient,
        default_table: impl Into<String>,
    ) -> Self {
        Self {
            vault,
            provider,
            memory,
            default_table: default_table.into(),
        }
    }

    /// Normalize `question` for `user_id`. Never fails.
    pub async fn normalize(&self, question: &str, history: &[String], user_id: &str) -> Normalized {
        if let Some(entry) = self.vault.lookup(question) {
            debug!(matched = %entry.question, "vault hit, skipping normalization");
            return Normalized {
                corrected_question: question.to_string(),
                entities: entry.entities.clone(),
                resolved_query: Some(entry.query.clone()),
            };
        }

        let recalled = self.memory.recall(question, user_id).await;

        let Some(provider) = &self.provider else {
            debug!("no generative backend, using default entities");
            return self.fallback(question);
        };

        let request = CompletionRequest::from_prompt(prompts::normalizer_user(
            question, history, &recalled,
        ))
        .with_system(prompts::normalizer_system());

        match provider.complete(&request).await {
            Ok(raw) => self.interpret(question, &raw),
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    provider = provider.provider_type(),
                    "normalizer backend call failed, using fallback"
                );
                self.fallback(question)
            }
        }
    }

    fn fallback(&self, question: &str) -> Normalized {
        Normalized {
            corrected_question: question.to_string(),
            entities: vec![self.default_table.clone()],
            resolved_query: None,
        }
    }

    fn interpret(&self, question: &str, raw: &str) -> Normalized {
        let output = match decode_or_default(raw, RouterOutput::default()) {
            Decoded::Parsed(output) => output,
            Decoded::Defaulted { .. } => return self.fallback(question),
        };

        let corrected_question = output
            .corrected_question
            .filter(|q| !q.trim().is_empty())
            .unwrap_or_else(|| question.to_string());

        let mut entities: Vec<String> = Vec::new();
        for table in output.tables.unwrap_or_default() {
            let table = table.trim();
            if !schema::is_known_table(table) {
                debug!(table, "dropping unknown table from normalizer output");
                continue;
            }
            if !entities.iter().any(|t| t == table) {
                entities.push(table.to_string());
            }
        }
        if entities.is_empty() {
            entities.push(self.default_table.clone());
        }

        Normalized {
            corrected_question,
            entities,
            resolved_query: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quarry_llm::{ProviderError, ProviderResult};
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: Result<String, String>,
        prompts: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection refused".to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn provider_type(&self) -> &str {
            "scripted"
        }
        fn model(&self) -> &str {
            "scripted-1"
        }
        async fn complete(&self, request: &CompletionRequest) -> ProviderResult<String> {
            self.prompts.lock().unwrap().push(request.clone());
            self.reply
                .clone()
                .map_err(|message| ProviderError::Other { message })
        }
    }

    fn normalizer(provider: Option<Arc<dyn Provider>>) -> Normalizer {
        Normalizer::new(Vault::builtin(), provider, MemoryClient::disabled(), "sales")
    }

    #[tokio::test]
    async fn vault_hit_returns_curated_query() {
        let provider = ScriptedProvider::ok("{}");
        let n = normalizer(Some(provider.clone()));
        let q = "Show the distribution of inventory quantity across all warehouse locations.";
        let out = n.normalize(q, &[], "u1").await;
        assert_eq!(out.corrected_question, q);
        assert_eq!(out.entities, vec!["inventory"]);
        assert!(out.resolved_query.unwrap().contains("FROM inventory"));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn no_backend_falls_back() {
        let out = normalizer(None).normalize("revnu by regin", &[], "u1").await;
        assert_eq!(out.corrected_question, "revnu by regin");
        assert_eq!(out.entities, vec!["sales"]);
        assert!(out.resolved_query.is_none());
    }

    #[tokio::test]
    async fn backend_output_is_used() {
        let provider = ScriptedProvider::ok(
            "```json\n{\"corrected_question\": \"revenue by region\", \"tables\": [\"sales\", \"regions\"]}\n```",
        );
        let n = normalizer(Some(provider.clone()));
        let history = vec!["show churn".to_string()];
        let out = n.normalize("revnu by regin", &history, "u1").await;
        assert_eq!(out.corrected_question, "revenue by region");
        assert_eq!(out.entities, vec!["sales", "regions"]);

        let prompts = provider.prompts.lock().unwrap();
        let user = &prompts[0].messages[1].content;
        assert!(user.contains("show churn"));
        assert!(user.contains("revnu by regin"));
    }

    #[tokio::test]
    async fn unknown_tables_dropped_and_missing_fields_defaulted() {
        let provider = ScriptedProvider::ok(r#"{"tables": ["orders", "customers", "customers"]}"#);
        let out = normalizer(Some(provider)).normalize("top buyers", &[], "u1").await;
        assert_eq!(out.corrected_question, "top buyers");
        assert_eq!(out.entities, vec!["customers"]);
    }

    #[tokio::test]
    async fn only_unknown_tables_yields_default() {
        let provider = ScriptedProvider::ok(r#"{"corrected_question": "x", "tables": ["orders"]}"#);
        let out = normalizer(Some(provider)).normalize("x", &[], "u1").await;
        assert_eq!(out.entities, vec!["sales"]);
    }

    #[tokio::test]
    async fn malformed_output_falls_back() {
        let provider = ScriptedProvider::ok("I think you want the sales table.");
        let out = normalizer(Some(provider)).normalize("sales?", &[], "u1").await;
        assert_eq!(out.corrected_question, "sales?");
        assert_eq!(out.entities, vec!["sales"]);
    }

    #[tokio::test]
    async fn backend_error_falls_back() {
        let out = normalizer(Some(ScriptedProvider::failing()))
            .normalize("churn trend", &[], "u1")
            .await;
        assert_eq!(out.corrected_question, "churn trend");
        assert_eq!(out.entities, vec!["sales"]);
    }

    #[tokio::test]
    async fn blank_corrected_question_keeps_input() {
        let provider = ScriptedProvider::ok(r#"{"corrected_question": "  ", "tables": ["marketing"]}"#);
        let out = normalizer(Some(provider)).normalize("ad spend", &[], "u1").await;
        assert_eq!(out.corrected_question, "ad spend");
        assert_eq!(out.entities, vec!["marketing"]);
    }
}
