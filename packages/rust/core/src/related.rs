//! Relatedness scoring between documents.
//!
//! A candidate's score is its word overlap with the query, scaled up by 10%
//! for every tag it shares with the query:
//!
//! ```text
//! score = (1 + 0.1 * shared_tags) * common_words
//! ```
//!
//! Tags only scale an existing word overlap; a candidate with no common words
//! scores zero however many tags it shares.

use std::collections::HashSet;

use serde::Serialize;
use tracing::instrument;

use docrank_shared::Document;

use crate::words::word_set;

/// Score boost per shared tag.
pub const TAG_BOOST: f64 = 0.1;

/// A candidate document with its relatedness score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scored<'a> {
    pub document: &'a Document,
    pub score: f64,
}

/// Precomputed query side of the scoring, reused across candidates.
#[derive(Debug, Clone)]
pub struct QueryProfile<'q> {
    id: &'q str,
    words: HashSet<String>,
    tags: HashSet<&'q str>,
}

impl<'q> QueryProfile<'q> {
    pub fn new(query: &'q Document) -> Self {
        Self {
            id: &query.id,
            words: word_set(query),
            tags: query.tags.iter().map(String::as_str).collect(),
        }
    }

    /// Whether `candidate` is the query document itself.
    pub fn is_query(&self, candidate: &Document) -> bool {
        candidate.id == self.id
    }

    /// Relatedness of `candidate` to the query.
    pub fn score(&self, candidate: &Document) -> f64 {
        let common_words = word_set(candidate)
            .iter()
            .filter(|w| self.words.contains(*w))
            .count();
        if common_words == 0 {
            return 0.0;
        }

        // Counted over the candidate's tags, so a repeated tag counts each time.
        let shared_tags = candidate
            .tags
            .iter()
            .filter(|t| self.tags.contains(t.as_str()))
            .count();

        (1.0 + TAG_BOOST * shared_tags as f64) * common_words as f64
    }
}

/// Score every document in `collection` except the query, highest first.
///
/// The sort is stable: candidates with equal scores keep their relative
/// order from `collection`.
#[instrument(level = "trace", skip_all, fields(query = %query.id, candidates = collection.len()))]
pub fn rank<'a>(query: &Document, collection: &'a [Document]) -> Vec<Scored<'a>> {
    let profile = QueryProfile::new(query);

    let mut scored: Vec<Scored<'a>> = collection
        .iter()
        .filter(|candidate| !profile.is_query(candidate))
        .map(|candidate| Scored {
            document: candidate,
            score: profile.score(candidate),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// The `n` documents most related to `query`, drawn from `collection`.
///
/// Returns fewer than `n` when the collection has fewer candidates.
pub fn related<'a>(query: &Document, collection: &'a [Document], n: usize) -> Vec<&'a Document> {
    rank(query, collection)
        .into_iter()
        .take(n)
        .map(|s| s.document)
        .collect()
}
