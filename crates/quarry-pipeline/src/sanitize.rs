//! Query text cleanup.
//!
//! Generated query text often arrives wrapped in Markdown code fences, with a
//! language tag, or with a trailing `;`. [`sanitize`] reduces it to the bare
//! statement. It is idempotent, and fenced text sanitizes to the same result
//! as the unwrapped text.

const FENCE: &str = "```";

/// Tags stripped when they follow a fence on the same line.
const INLINE_TAGS: &[&str] = &["sql", "sqlite", "json"];

/// Words that start a statement and so are never a language tag.
const STATEMENT_KEYWORDS: &[&str] = &[
    "select", "with", "insert", "update", "delete", "pragma", "explain", "values",
];

/// Strip fences, language tags, surrounding whitespace and trailing `;`.
pub fn sanitize(raw: &str) -> String {
    let body = match extract_fenced_block(raw) {
        Some(inner) => inner.to_string(),
        None => strip_stray_fences(raw),
    };
    trim_statement(&body).to_string()
}

/// Inner text of the first complete fenced block, without its language tag.
pub fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find(FENCE)?;
    let after_open = &text[start + FENCE.len()..];
    let end = after_open.find(FENCE)?;
    Some(strip_language_tag(&after_open[..end]))
}

fn tag_len(text: &str) -> usize {
    text.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
        .unwrap_or(text.len())
}

fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn strip_language_tag(inner: &str) -> &str {
    let len = tag_len(inner);
    if len == 0 {
        return inner;
    }
    let (tag, rest) = inner.split_at(len);
    let on_own_line = rest.starts_with('\n') || rest.starts_with("\r\n");
    if on_own_line && !STATEMENT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(tag)) {
        return rest;
    }
    if is_inline_tag(tag) && rest.starts_with(char::is_whitespace) {
        return rest;
    }
    inner
}

fn strip_stray_fences(text: &str) -> String {
    let mut out = text.to_string();
    while let Some(pos) = out.find(FENCE) {
        let after = &out[pos + FENCE.len()..];
        let len = tag_len(after);
        let rest = &after[len..];
        let tag = if len > 0
            && is_inline_tag(&after[..len])
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            len
        } else {
            0
        };
        out.replace_range(pos..pos + FENCE.len() + tag, "");
    }
    out
}

fn trim_statement(text: &str) -> &str {
    text.trim_start()
        .trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn plain_query_only_trimmed() {
        assert_eq!(sanitize("  SELECT * FROM sales;  \n"), "SELECT * FROM sales");
    }

    #[test]
    fn fenced_with_tag() {
        assert_eq!(
            sanitize("```sql\nSELECT * FROM sales;\n```"),
            "SELECT * FROM sales"
        );
        assert_eq!(sanitize("```SQLite\nSELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn fenced_without_tag() {
        assert_eq!(sanitize("```\nSELECT 1\n```"), "SELECT 1");
    }

    #[test]
    fn inline_tag_on_fence_line() {
        assert_eq!(sanitize("```sql SELECT 1```"), "SELECT 1");
    }

    #[test]
    fn statement_keyword_on_first_line_is_kept() {
        assert_eq!(
            sanitize("```SELECT\n  region\nFROM sales\n```"),
            "SELECT\n  region\nFROM sales"
        );
    }

    #[test]
    fn first_block_wins_and_prose_is_dropped() {
        let raw = "Here is the query:\n```sql\nSELECT 1;\n```\nand another:\n```sql\nSELECT 2;\n```";
        assert_eq!(sanitize(raw), "SELECT 1");
    }

    #[test]
    fn stray_fences_removed() {
        assert_eq!(sanitize("```sql SELECT * FROM sales"), "SELECT * FROM sales");
        assert_eq!(sanitize("SELECT * FROM sales```"), "SELECT * FROM sales");
    }

    #[test]
    fn multiple_terminators_removed() {
        assert_eq!(sanitize("SELECT 1;;  ; "), "SELECT 1");
    }

    #[test]
    fn fence_only_is_empty() {
        assert_eq!(sanitize("``````"), "");
        assert_eq!(sanitize("```sql\n```"), "");
    }

    #[test]
    fn extract_block_for_json() {
        let raw = "```json\n{\"tables\": [\"sales\"]}\n```";
        assert_eq!(
            extract_fenced_block(raw).map(str::trim),
            Some("{\"tables\": [\"sales\"]}")
        );
        assert!(extract_fenced_block("no fences").is_none());
    }

    proptest! {
        #[test]
        fn idempotent(raw in "[`a-zA-Z ;\\n]{0,48}") {
            let once = sanitize(&raw);
            prop_assert_eq!(sanitize(&once), once.clone());
            prop_assert!(!once.contains(FENCE));
        }

        #[test]
        fn fence_transparent(body in "[a-zA-Z][a-zA-Z0-9 *,=]{0,40}") {
            let wrapped = format!("```sql\n{body}\n```");
            prop_assert_eq!(sanitize(&wrapped), sanitize(&body));
        }
    }
}
