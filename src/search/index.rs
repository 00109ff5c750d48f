//! TF-IDF inverted index implementation for full-text search.

use crate::entry::{Category, DocEntry};
use crate::index::SearchIndex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::scoring::symbol_relevance;
use super::tokenize::{TermBuilder, hash_term, tokenize_and_stem};

/// Term hash for fast lookup
type TermHash = u64;

/// Score added per relevance point when a title matches the query directly.
const TITLE_BOOST_PER_POINT: f32 = 0.05;

/// A searchable term index with TF-IDF scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    /// Map from term hash to list of (entry position, tf_idf_score) pairs, sorted by score descending
    terms: HashMap<TermHash, Vec<(usize, f32)>>,
    /// Number of entries the index was built from
    document_count: usize,
}

impl InvertedIndex {
    pub(super) const fn new(terms: HashMap<TermHash, Vec<(usize, f32)>>, document_count: usize) -> Self {
        Self {
            terms,
            document_count,
        }
    }

    /// Builds an inverted index over every entry of a loaded search index.
    pub fn build(index: &SearchIndex) -> Self {
        let mut builder = TermBuilder::default();
        for (position, entry) in index.iter().enumerate() {
            builder.add_entry(position, entry);
        }
        builder.finalize()
    }

    /// Searches for entries matching the query using TF-IDF scoring.
    /// Returns entry positions sorted by relevance score (highest first).
    ///
    /// The query is tokenized and stemmed just like indexed terms, so
    /// "extractCoefs", "extract_coefs" and "extract coefficients" all reach
    /// the same postings.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(usize, f32)> {
        let stemmer = Stemmer::create(Algorithm::English);
        let tokens = tokenize_and_stem(query, &stemmer);

        if tokens.is_empty() {
            return vec![];
        }

        let mut combined_scores: HashMap<usize, f32> = HashMap::new();

        for token in &tokens {
            let term_hash = hash_term(token);
            if let Some(results) = self.terms.get(&term_hash) {
                for (position, score) in results {
                    *combined_scores.entry(*position).or_insert(0.0) += score;
                }
            }
        }

        let mut results: Vec<_> = combined_scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .collect();
        results.sort_by(|(a_pos, a), (b_pos, b)| b.total_cmp(a).then(a_pos.cmp(b_pos)));
        results.truncate(limit);
        results
    }

    /// Get the number of unique terms in the index
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Get the number of documents in the index
    pub const fn document_count(&self) -> usize {
        self.document_count
    }
}

/// A search match with entry position and relevance ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMatch {
    pub position: usize,
    pub rank: f32,
}

/// Detailed search result with the matched entry.
#[derive(Debug, Clone)]
pub struct DetailedSearchResult<'a> {
    pub position: usize,
    pub entry: &'a DocEntry,
    pub rank: f32,
    /// Direct title relevance (exact 100, prefix 50, substring 10), if any
    pub title_relevance: Option<u32>,
}

/// A loaded search index paired with its term index.
#[derive(Debug, Clone)]
pub struct TermIndex {
    docs: SearchIndex,
    terms: InvertedIndex,
}

impl TermIndex {
    /// Build the term index for `docs`.
    pub fn build(docs: SearchIndex) -> Self {
        let terms = InvertedIndex::build(&docs);
        Self { docs, terms }
    }

    /// Pair `docs` with a previously built term index.
    ///
    /// Returns `None` if the term index was built from a different number of entries.
    pub fn from_parts(docs: SearchIndex, terms: InvertedIndex) -> Option<Self> {
        (terms.document_count() == docs.len()).then_some(Self { docs, terms })
    }

    pub const fn docs(&self) -> &SearchIndex {
        &self.docs
    }

    pub const fn terms(&self) -> &InvertedIndex {
        &self.terms
    }

    /// Searches within this index and returns matches with position and rank.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchMatch> {
        self.terms
            .search(query, limit)
            .into_iter()
            .map(|(position, rank)| SearchMatch { position, rank })
            .collect()
    }

    /// Ranked search with direct title matches boosted, optionally restricted
    /// to one category (compared case-insensitively).
    pub fn search_detailed(
        &self,
        query: &str,
        category: Option<&Category>,
        limit: usize,
    ) -> Vec<DetailedSearchResult<'_>> {
        // Title matches can surface entries the term index ranks low, so
        // over-fetch before filtering and re-ranking.
        let mut ranked: HashMap<usize, f32> = self
            .terms
            .search(query, self.docs.len())
            .into_iter()
            .collect();

        for (position, entry) in self.docs.iter().enumerate() {
            if symbol_relevance(&entry.title, query).is_some() {
                ranked.entry(position).or_insert(0.0);
            }
        }

        let mut results: Vec<DetailedSearchResult<'_>> = ranked
            .into_iter()
            .filter_map(|(position, rank)| {
                let entry = self.docs.get(position)?;
                if category.is_some_and(|c| !entry.category.as_str().eq_ignore_ascii_case(c.as_str())) {
                    return None;
                }
                let title_relevance = symbol_relevance(&entry.title, query);
                let boost = title_relevance.map_or(0.0, |r| r as f32 * TITLE_BOOST_PER_POINT);
                Some(DetailedSearchResult {
                    position,
                    entry,
                    rank: rank + boost,
                    title_relevance,
                })
            })
            .collect();

        results.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.position.cmp(&b.position)));
        results.truncate(limit);

        tracing::debug!(
            "Search for '{}' returned {} results (category: {:?})",
            query,
            results.len(),
            category.map(Category::as_str)
        );

        results
    }
}
