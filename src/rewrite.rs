//! Query rewriting against the alias store.
//!
//! The rewriter scans a free-text query at Unicode word boundaries and swaps
//! alias spans for their canonical values, longest match first, so a
//! three-token phrase like "Rio de Janeiro" wins over a partial hit on "Rio".
//! Cost is linear in query length times the (bounded) window size; there is
//! no backtracking, and a consumed span is never re-scanned.

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::alias::AliasStore;
use crate::normalize::normalize_text;

/// Hard ceiling on how many consecutive word tokens form one candidate span.
/// The effective window is further capped by the store's longest alias phrase.
const MAX_SPAN_TOKENS: usize = 4;

/// One alias-to-canonical replacement made during a rewrite.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Substitution {
    /// Exact text of the span as it appeared in the query.
    pub original_span: String,
    /// Normalized alias that matched.
    pub matched_alias: String,
    /// Canonical value substituted into the query.
    pub canonical_value: String,
    /// Column whose mapping produced the match.
    pub column: String,
}

/// Rewritten query plus the ordered substitution report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub normalized_query: String,
    pub mapped_terms: Vec<Substitution>,
}

impl RewriteOutcome {
    fn passthrough(query: &str) -> Self {
        RewriteOutcome {
            normalized_query: query.to_string(),
            mapped_terms: Vec::new(),
        }
    }

    /// JSON rendering of the outcome for the agent boundary.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Serializing rewrite outcome")
    }

    /// Short human-readable rendering of the substitutions, one per term,
    /// suitable for echoing back to the user.
    pub fn summary(&self) -> String {
        self.mapped_terms
            .iter()
            .map(|s| {
                format!(
                    "'{}' -> '{}' ({})",
                    s.original_span, s.canonical_value, s.column
                )
            })
            .join("; ")
    }
}

/// Rewrites `query` by substituting recognized alias spans with canonical
/// values. Pure function of its inputs: identical arguments always yield an
/// identical outcome. Queries with no alias hits (or an empty store) pass
/// through unchanged with an empty report.
pub fn normalize_query_terms(query: &str, store: &AliasStore) -> RewriteOutcome {
    let tokens: Vec<(usize, &str)> = query
        .split_word_bound_indices()
        .filter(|(_, segment)| segment.chars().any(char::is_alphanumeric))
        .collect();
    if tokens.is_empty() || store.is_empty() {
        return RewriteOutcome::passthrough(query);
    }
    let window_cap = MAX_SPAN_TOKENS.min(store.max_alias_tokens()).max(1);

    let mut output = String::with_capacity(query.len());
    let mut mapped_terms = Vec::new();
    let mut cursor = 0usize;
    let mut index = 0usize;

    while index < tokens.len() {
        let (span_start, first_token) = tokens[index];
        // Separator text between the previous span and this one is kept
        // verbatim.
        output.push_str(&query[cursor..span_start]);

        let widest = window_cap.min(tokens.len() - index);
        let hit = (1..=widest).rev().find_map(|window| {
            let (last_start, last_token) = tokens[index + window - 1];
            let span_end = last_start + last_token.len();
            let span = &query[span_start..span_end];
            let term = normalize_text(span);
            store.resolve(&term).map(|(column, canonical)| {
                (
                    window,
                    span_end,
                    Substitution {
                        original_span: span.to_string(),
                        matched_alias: term,
                        canonical_value: canonical.to_string(),
                        column: column.to_string(),
                    },
                )
            })
        });

        match hit {
            Some((window, span_end, substitution)) => {
                output.push_str(&substitution.canonical_value);
                mapped_terms.push(substitution);
                cursor = span_end;
                index += window;
            }
            None => {
                output.push_str(first_token);
                cursor = span_start + first_token.len();
                index += 1;
            }
        }
    }
    output.push_str(&query[cursor..]);

    RewriteOutcome {
        normalized_query: output,
        mapped_terms,
    }
}
