//! Text tokenization and stemming utilities for search indexing.

use crate::entry::DocEntry;
use ahash::AHashMap;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashMap;
use xxhash_rust::xxh3::xxh3_64;

use super::index::InvertedIndex;

/// Minimum token length for indexing. Set to 1 so single-letter parameters like `p` and `e` are kept.
const MIN_TOKEN_LENGTH: usize = 1;

/// Weight of terms found in an entry title.
const TITLE_WEIGHT: f32 = 2.0;
/// Weight of terms found in the rendered docstring.
const TEXT_WEIGHT: f32 = 1.0;
/// Weight of terms found in the page name.
const PAGE_WEIGHT: f32 = 0.5;

/// Common English stop words to filter out from indexing.
/// These high-frequency words add little value to search relevance.
pub(crate) const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with",
];

/// Position of an entry in its `SearchIndex`.
type DocId = usize;

/// Term hash for fast lookup
type TermHash = u64;

/// Builder for accumulating term frequencies before TF-IDF finalization.
pub(crate) struct TermBuilder {
    /// Flat map from (term_hash, doc_id) → raw TF score
    term_docs: HashMap<(TermHash, DocId), f32>,
    /// Map from doc_id to document length (total term count for normalization)
    doc_lengths: HashMap<DocId, usize>,
    /// Number of entries seen, including ones that produced no terms
    document_count: usize,
    /// Reusable stemmer instance for English language stemming
    stemmer: Stemmer,
}

impl Default for TermBuilder {
    fn default() -> Self {
        Self {
            term_docs: HashMap::default(),
            doc_lengths: HashMap::default(),
            document_count: 0,
            stemmer: Stemmer::create(Algorithm::English),
        }
    }
}

impl TermBuilder {
    /// Add a term with its TF score for a specific document.
    fn add(&mut self, term: &str, tf_score: f32, doc_id: DocId) {
        let term_hash = hash_term(term);
        *self.term_docs.entry((term_hash, doc_id)).or_insert(0.0) += tf_score;
    }

    /// Extracts and adds terms from text with frequency counting.
    /// TF score = term_count * base_score, where base_score weights importance (titles over docstrings).
    fn add_terms(&mut self, text: &str, doc_id: DocId, base_score: f32) {
        let words = tokenize_and_stem(text, &self.stemmer);

        let mut word_counts: AHashMap<String, usize> = AHashMap::with_capacity(words.len());
        for word in words {
            *word_counts.entry(word).or_insert(0) += 1;
        }

        let doc_len: usize = word_counts.values().sum();
        *self.doc_lengths.entry(doc_id).or_insert(0) += doc_len;

        for (word, count) in word_counts {
            let tf_score = (count as f32) * base_score;
            self.add(&word, tf_score, doc_id);
        }
    }

    /// Index one entry under its position.
    pub(crate) fn add_entry(&mut self, doc_id: DocId, entry: &DocEntry) {
        self.document_count = self.document_count.max(doc_id + 1);

        self.add_terms(&entry.title, doc_id, TITLE_WEIGHT);
        // Anchors carry the symbol even when the title is a page heading
        if let Some(anchor) = entry.anchor()
            && anchor.symbol != entry.title
        {
            self.add_terms(anchor.symbol, doc_id, TITLE_WEIGHT);
        }
        self.add_terms(&entry.text, doc_id, TEXT_WEIGHT);
        self.add_terms(&entry.page, doc_id, PAGE_WEIGHT);
    }

    /// Calculates IDF scores and produces the final searchable index.
    /// Uses formula: TF-IDF = sublinear(tf_normalized) * ln(total_docs / doc_freq),
    /// where tf_normalized = tf / doc_length for length normalization.
    pub(crate) fn finalize(self) -> InvertedIndex {
        let start = std::time::Instant::now();
        let total_docs = self.document_count as f32;

        let total_length: usize = self.doc_lengths.values().sum();
        let avg_doc_length = if self.doc_lengths.is_empty() {
            1.0
        } else {
            total_length as f32 / self.doc_lengths.len() as f32
        };

        // Group flat term_docs by term_hash
        let mut grouped: HashMap<TermHash, Vec<(DocId, f32)>> = HashMap::new();
        let total_term_doc_pairs = self.term_docs.len();
        for ((term_hash, doc_id), tf_score) in self.term_docs {
            grouped.entry(term_hash).or_default().push((doc_id, tf_score));
        }

        let mut terms: HashMap<TermHash, Vec<(usize, f32)>> = HashMap::with_capacity(grouped.len());

        for (term_hash, doc_scores) in grouped {
            // IDF = ln(total_docs / doc_freq)
            let doc_freq = doc_scores.len() as f32;
            let idf = (total_docs / doc_freq).ln();

            let mut tf_idf_scores: Vec<_> = doc_scores
                .into_iter()
                .map(|(doc_id, tf_score)| {
                    let doc_length = self.doc_lengths.get(&doc_id).copied().unwrap_or(1) as f32;
                    let length_norm = doc_length / avg_doc_length;
                    let tf_normalized = tf_score / length_norm.max(0.5); // Clamp to prevent over-penalization
                    (doc_id, sublinear_tf(tf_normalized) * idf)
                })
                .collect();

            // Descending by score, then build order
            tf_idf_scores.sort_by(|(a_id, a), (b_id, b)| b.total_cmp(a).then(a_id.cmp(b_id)));

            terms.insert(term_hash, tf_idf_scores);
        }

        let index = InvertedIndex::new(terms, self.document_count);

        tracing::info!(
            "Built search index: {} unique terms, {} documents, {} term-document pairs in {:?}",
            index.term_count(),
            index.document_count(),
            total_term_doc_pairs,
            start.elapsed()
        );

        index
    }
}

/// `1 + ln(tf)` above one, linear below so weights never go negative.
fn sublinear_tf(tf: f32) -> f32 {
    if tf >= 1.0 { 1.0 + tf.ln() } else { tf }
}

/// Tokenizes text into searchable terms with stemming and case-aware splitting.
///
/// This function implements a state machine that splits text on multiple boundaries:
/// - **CamelCase**: "UnfoldModel" → ["Unfold", "Model", "UnfoldModel"]
/// - **snake_case**: "extract_coefs" → ["extract", "coefs", "extract_coefs"]
/// - **hyphen-case**: "multi-line" → ["multi", "line"]
/// - **qualified names**: "UnfoldStats.get_basisnames" → words split on the dot
///
/// The state machine maintains two pointers:
/// - `word_start`: Start of the complete word (e.g., "UnfoldModel")
/// - `subword_start`: Start of the current sub-component (e.g., "Model")
///
/// This allows extracting both individual components and the full compound term.
pub(crate) fn tokenize_and_stem(text: &str, stemmer: &Stemmer) -> Vec<String> {
    let mut tokens = vec![];

    let mut last_case = None;
    let mut word_start = 0;
    let mut subword_start = 0;
    let mut word_start_next_char = true;
    let mut subword_start_next_char = true;

    for (i, c) in text.char_indices() {
        if word_start_next_char {
            word_start = i;
            subword_start = i;
            word_start_next_char = false;
            subword_start_next_char = false;
        }

        if subword_start_next_char {
            subword_start = i;
            subword_start_next_char = false;
        }

        // lowercase → uppercase starts a CamelCase subword
        let current_case = c.is_alphabetic().then(|| c.is_uppercase());
        let case_change = last_case == Some(false) && current_case == Some(true);
        last_case = current_case;

        if c == '-' || c == '_' {
            if i.saturating_sub(subword_start) >= MIN_TOKEN_LENGTH {
                index_token(&text[subword_start..i], &mut tokens, stemmer);
            }
            subword_start_next_char = true;
        } else if !c.is_alphabetic() {
            // End of a complete word: emit the trailing subword, then the word itself
            if i.saturating_sub(subword_start) >= MIN_TOKEN_LENGTH && subword_start != word_start {
                index_token(&text[subword_start..i], &mut tokens, stemmer);
            }
            if i.saturating_sub(word_start) >= MIN_TOKEN_LENGTH {
                index_token(&text[word_start..i], &mut tokens, stemmer);
            }
            word_start_next_char = true;
        } else if case_change {
            if i.saturating_sub(subword_start) >= MIN_TOKEN_LENGTH {
                index_token(&text[subword_start..i], &mut tokens, stemmer);
            }
            subword_start = i;
        }
    }

    if !word_start_next_char {
        let last_subword = &text[subword_start..];
        if word_start != subword_start && last_subword.len() >= MIN_TOKEN_LENGTH {
            index_token(last_subword, &mut tokens, stemmer);
        }
        let last_word = &text[word_start..];
        if last_word.len() >= MIN_TOKEN_LENGTH {
            index_token(last_word, &mut tokens, stemmer);
        }
    }

    tokens
}

/// Add a token using proper stemming algorithm, filtering out stop words.
pub(crate) fn index_token(token: &str, tokens: &mut Vec<String>, stemmer: &Stemmer) {
    let lowercase = token.to_lowercase();

    if STOP_WORDS.contains(&lowercase.as_str()) {
        return;
    }

    let stemmed = stemmer.stem(&lowercase);
    tokens.push(stemmed.into_owned());
}

/// Hashes a term for fast lookup (case-insensitive).
///
/// Term hashes are persisted in the index cache, so this must stay stable
/// across builds and targets.
pub(crate) fn hash_term(term: &str) -> u64 {
    xxh3_64(term.to_lowercase().as_bytes())
}
