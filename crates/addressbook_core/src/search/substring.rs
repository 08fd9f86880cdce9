//! Case-insensitive substring matching.
//!
//! # Responsibility
//! - Decide whether a query matches a single field or any of several fields.
//!
//! # Invariants
//! - Matching is OR across fields: one matching field includes the record.
//! - An empty query matches everything (the empty string is a substring of
//!   any text).
//! - No ranking; callers keep their own collection order.

/// Returns whether `needle` occurs in `haystack`, ignoring case.
///
/// Both sides are lowercased with Unicode rules before the substring test,
/// so `"CORRiE"` matches `"corrie.co.uk"`.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Returns whether `query` matches at least one of `fields`.
pub fn matches_any<'a>(fields: impl IntoIterator<Item = &'a str>, query: &str) -> bool {
    fields
        .into_iter()
        .any(|field| contains_ignore_case(field, query))
}
