//! # Vault
//!
//! Catalog of curated questions, each mapped to a pre-validated query and the
//! tables it reads. A vault hit bypasses generative synthesis entirely.
//!
//! Lookup order:
//! 1. Exact match on normalized text (trimmed, lower-cased, one trailing
//!    period removed). An exact hit is final.
//! 2. Fuzzy match of the raw input against the raw catalog questions; the
//!    best candidate scoring at least [`FUZZY_MATCH_THRESHOLD`] wins, earlier
//!    catalog entries winning ties.

mod catalog;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use tracing::debug;

use crate::similarity::{DiffRatio, FUZZY_MATCH_THRESHOLD, Similarity};

struct CatalogEntry {
    question: &'static str,
    query: &'static str,
    entities: &'static [&'static str],
}

/// A curated question with its validated query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VaultEntry {
    /// Canonical question text.
    pub question: String,
    /// Validated query text.
    pub query: String,
    /// Tables the query reads.
    pub entities: Vec<String>,
}

impl VaultEntry {
    /// Create an entry.
    pub fn new<I, S>(question: impl Into<String>, query: impl Into<String>, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question: question.into(),
            query: query.into(),
            entities: entities.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&CatalogEntry> for VaultEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self::new(entry.question, entry.query, entry.entities.iter().copied())
    }
}

static BUILTIN_VAULT: LazyLock<Vault> =
    LazyLock::new(|| Vault::new(catalog::BUILTIN.iter().map(VaultEntry::from).collect()));

/// Normalize a question for exact matching.
pub fn normalize_question(question: &str) -> String {
    let lowered = question.trim().to_lowercase();
    match lowered.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => lowered,
    }
}

/// Look a question up in the built-in vault.
pub fn lookup(question: &str) -> Option<&'static VaultEntry> {
    Vault::builtin().lookup(question)
}

/// An immutable question catalog.
pub struct Vault {
    entries: Vec<VaultEntry>,
    exact: HashMap<String, usize>,
    similarity: Box<dyn Similarity>,
}

impl Vault {
    /// Build a vault matching fuzzily by [`DiffRatio`].
    pub fn new(entries: Vec<VaultEntry>) -> Self {
        Self::with_similarity(entries, Box::new(DiffRatio))
    }

    /// Build a vault with a custom similarity measure.
    pub fn with_similarity(entries: Vec<VaultEntry>, similarity: Box<dyn Similarity>) -> Self {
        let mut exact = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let _ = exact.entry(normalize_question(&entry.question)).or_insert(i);
        }
        Self {
            entries,
            exact,
            similarity,
        }
    }

    /// The process-wide built-in catalog.
    pub fn builtin() -> &'static Vault {
        &BUILTIN_VAULT
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `question`, if any.
    pub fn lookup(&self, question: &str) -> Option<&VaultEntry> {
        if let Some(&i) = self.exact.get(&normalize_question(question)) {
            return self.entries.get(i);
        }

        let mut best: Option<(f64, &VaultEntry)> = None;
        for entry in &self.entries {
            let score = self.similarity.similarity(question, &entry.question);
            if score < FUZZY_MATCH_THRESHOLD {
                continue;
            }
            if best.is_none_or(|(top, _)| score > top) {
                best = Some((score, entry));
            }
        }

        let (score, entry) = best?;
        debug!(
            question,
            matched = %entry.question,
            score,
            measure = self.similarity.name(),
            "vault fuzzy match"
        );
        Some(entry)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
