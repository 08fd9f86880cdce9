//! Free-text search entry points.
//!
//! # Responsibility
//! - Provide the substring match predicate used by record search.
//! - Keep matching semantics in one place so every record type agrees.

pub mod substring;

pub use substring::{contains_ignore_case, matches_any};
