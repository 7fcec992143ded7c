//! Prompt templates for the generative stages.
//!
//! Instructions live in Markdown files loaded via [`include_str!`]; the
//! per-request context (history, recalled memories, question) goes in the
//! user message.

use crate::schema;

const NORMALIZER_TEMPLATE: &str = include_str!("normalizer.md");
const SYNTHESIZER_TEMPLATE: &str = include_str!("synthesizer.md");

/// System prompt for the intent normalizer.
pub fn normalizer_system() -> String {
    NORMALIZER_TEMPLATE.replace("{tables}", &schema::table_list())
}

/// System prompt for the query synthesizer.
pub fn synthesizer_system() -> String {
    SYNTHESIZER_TEMPLATE
        .replace("{table_count}", &schema::TABLES.len().to_string())
        .replace("{schema}", &schema::describe())
}

/// User message for the intent normalizer.
pub fn normalizer_user(question: &str, history: &[String], recalled: &[String]) -> String {
    let mut out = context_sections(history);
    if !recalled.is_empty() {
        out.push_str("## Related Past Interactions\n");
        for memory in recalled {
            out.push_str("- ");
            out.push_str(memory);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str("Question: ");
    out.push_str(question);
    out
}

/// User message for the query synthesizer.
pub fn synthesizer_user(question: &str, history: &[String]) -> String {
    let mut out = context_sections(history);
    out.push_str("Question: ");
    out.push_str(question);
    out.push_str("\nSQL Query:");
    out
}

fn context_sections(history: &[String]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let mut out = String::from("## Previous Conversation\n");
    for turn in history {
        out.push_str("- ");
        out.push_str(turn);
        out.push('\n');
    }
    out.push('\n');
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizer_lists_all_tables() {
        let prompt = normalizer_system();
        assert!(!prompt.contains("{tables}"));
        for table in schema::TABLES {
            assert!(prompt.contains(table.name), "{}", table.name);
        }
    }

    #[test]
    fn synthesizer_embeds_schema_and_window() {
        let prompt = synthesizer_system();
        assert!(prompt.contains("## Schema (15 tables)"));
        assert!(prompt.contains("14. product_reviews: review_id"));
        assert!(prompt.contains("BETWEEN '2024-01-01' AND '2025-12-31'"));
        assert!(!prompt.contains("{schema}"));
    }

    #[test]
    fn user_message_includes_history_and_memories() {
        let msg = normalizer_user(
            "revnu by regin",
            &["show churn".to_string()],
            &["User Question: churn | AI Insight: Churn Count was 12.00".to_string()],
        );
        assert!(msg.contains("## Previous Conversation\n- show churn"));
        assert!(msg.contains("## Related Past Interactions"));
        assert!(msg.ends_with("Question: revnu by regin"));
    }

    #[test]
    fn user_message_without_context_is_just_question() {
        assert_eq!(synthesizer_user("top products", &[]), "Question: top products\nSQL Query:");
    }
}
