//! String similarity for fuzzy catalog matching.
//!
//! Scores are in `[0, 1]`; `1.0` means identical.

use similar::TextDiff;

/// Minimum score a fuzzy vault candidate must reach.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.90;

/// A pluggable similarity measure.
pub trait Similarity: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Similarity of `a` and `b` in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Matching-characters ratio of a character diff: `2 * M / (len(a) + len(b))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiffRatio;

impl Similarity for DiffRatio {
    fn name(&self) -> &'static str {
        "diff_ratio"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        f64::from(TextDiff::from_chars(a, b).ratio())
    }
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn name(&self) -> &'static str {
        "normalized_levenshtein"
    }

    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "Show me the average resolution time for High Priority tickets by support agent.";

    fn measures() -> [&'static dyn Similarity; 2] {
        [&DiffRatio, &NormalizedLevenshtein]
    }

    #[test]
    fn identical_strings_score_one() {
        for m in measures() {
            assert!((m.similarity(KEY, KEY) - 1.0).abs() < 1e-9, "{}", m.name());
        }
    }

    #[test]
    fn single_substitution_in_long_key_passes_threshold() {
        let typo = KEY.replace("resolution", "resolutiom");
        for m in measures() {
            assert!(m.similarity(&typo, KEY) >= FUZZY_MATCH_THRESHOLD, "{}", m.name());
        }
    }

    #[test]
    fn generic_overlap_stays_below_threshold() {
        for m in measures() {
            assert!(
                m.similarity("Show me the tickets", KEY) < FUZZY_MATCH_THRESHOLD,
                "{}",
                m.name()
            );
        }
    }

    #[test]
    fn scores_are_bounded() {
        for m in measures() {
            let s = m.similarity("abc", "xyz");
            assert!((0.0..=1.0).contains(&s), "{}", m.name());
        }
    }

    #[test]
    fn diff_ratio_matches_textbook_value() {
        // "abcd" vs "bcde": 3 matching chars, 2 * 3 / 8
        assert!((DiffRatio.similarity("abcd", "bcde") - 0.75).abs() < 1e-6);
    }
}
