//! Result records.
//!
//! A [`Record`] is one row of an executed query: an ordered mapping from
//! column name to a JSON scalar (`null`, boolean, number or string). Column
//! order follows the executor's column order and is preserved through
//! serialization, so "first column" rules downstream stay deterministic.

use serde_json::Value;

/// One result row: column name → scalar value, in column order.
pub type Record = serde_json::Map<String, Value>;

/// Column names of a result set, taken from its first record.
///
/// Returns an empty list for an empty result set.
pub fn column_names(records: &[Record]) -> Vec<String> {
    records
        .first()
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default()
}

/// Whether every record carries exactly the same set of columns.
///
/// An empty result set is trivially uniform.
pub fn is_uniform(records: &[Record]) -> bool {
    let Some(first) = records.first() else {
        return true;
    };
    records[1..]
        .iter()
        .all(|r| r.len() == first.len() && first.keys().all(|k| r.contains_key(k)))
}

/// Numeric view of a scalar.
///
/// Only JSON numbers are numeric; booleans and numeric-looking strings are not.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
