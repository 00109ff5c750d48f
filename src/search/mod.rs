//! Full-text search over documentation entries.
//!
//! This module provides TF-IDF based search across a loaded search index,
//! including tokenization, indexing and title relevance scoring.

pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod tokenize;

pub use index::{DetailedSearchResult, InvertedIndex, SearchMatch, TermIndex};
pub use scoring::{calculate_relevance, symbol_relevance};
