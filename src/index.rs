//! Precomputed inverted score index.
//!
//! For every term and every document containing it, the full BM25
//! contribution is computed once at construction and stored as
//! term -> (document id -> score). Retrieval then accumulates scores with
//! O(1) average per-term lookup instead of re-running the formula.

use ahash::AHashMap;

use crate::scoring::Bm25Scorer;
use crate::stats::DocumentStats;

/// Number of decimal digits kept for stored contributions.
const SCORE_DECIMALS: f32 = 100.0;

/// Inverted index of precomputed BM25 contributions.
///
/// Only (term, document) pairs where the term actually occurs are present;
/// absence means a zero contribution. Stored scores are rounded to two
/// decimal digits. Read-only after construction; a corpus change requires
/// a full rebuild.
#[derive(Debug, Clone)]
pub struct ScoreIndex {
    postings: AHashMap<String, AHashMap<u32, f32>>,
}

impl ScoreIndex {
    /// Build the index over all corpus documents.
    ///
    /// Cost is O(total tokens across the corpus).
    pub fn build(scorer: &Bm25Scorer<'_>, documents: &[DocumentStats]) -> ScoreIndex {
        let mut postings: AHashMap<String, AHashMap<u32, f32>> = AHashMap::new();

        for (doc_id, document) in documents.iter().enumerate() {
            for term in document.term_frequencies.keys() {
                let score = round_score(scorer.term_score(term, document));
                postings
                    .entry(term.clone())
                    .or_default()
                    .insert(doc_id as u32, score);
            }
        }

        ScoreIndex { postings }
    }

    /// Precomputed per-document contributions for `term`, or `None` if the
    /// term never occurs in the corpus.
    pub fn postings(&self, term: &str) -> Option<&AHashMap<u32, f32>> {
        self.postings.get(term)
    }

    /// Stored contribution of `term` to `doc_id`, or `None` if the term
    /// does not occur in that document.
    pub fn score(&self, term: &str, doc_id: u32) -> Option<f32> {
        self.postings.get(term).and_then(|p| p.get(&doc_id)).copied()
    }

    /// Number of distinct terms in the index.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}

fn round_score(score: f32) -> f32 {
    (score * SCORE_DECIMALS).round() / SCORE_DECIMALS
}
