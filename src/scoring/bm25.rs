//! The Okapi BM25 ranking function.
//!
//! [`Bm25Scorer`] computes the contribution of one term to one document's
//! score, whole-document scores as the sum of per-term contributions, and
//! an ad-hoc similarity between two arbitrary term sequences that need not
//! come from the corpus.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::stats::{CorpusStats, DocumentStats};

/// Configuration for BM25 scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bm25Params {
    /// K1 parameter (term frequency saturation).
    pub k1: f32,

    /// B parameter (document length normalization).
    pub b: f32,

    /// Multiplier applied to the average IDF to floor negative IDF values.
    pub epsilon: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Bm25Params {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.25,
        }
    }
}

/// BM25 term scorer backed by precomputed corpus statistics.
///
/// Purely functional: scoring never mutates the statistics it borrows.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer<'a> {
    stats: &'a CorpusStats,
    params: &'a Bm25Params,
}

impl<'a> Bm25Scorer<'a> {
    /// Create a scorer over the given corpus statistics.
    pub fn new(stats: &'a CorpusStats, params: &'a Bm25Params) -> Self {
        Bm25Scorer { stats, params }
    }

    /// Contribution of a single term to the score of one corpus document.
    ///
    /// Returns 0 if the term does not occur in the document.
    pub fn term_score(&self, term: &str, document: &DocumentStats) -> f32 {
        let tf = document.frequency(term);
        if tf == 0 {
            return 0.0;
        }

        // The term occurs in the document, so it is in the corpus
        // vocabulary and the IDF lookup cannot miss.
        let idf = self.stats.idf(term).unwrap_or(0.0);
        self.weighted_term_frequency(idf, tf as f32, document.length as f32)
    }

    /// Full score of `document` against one corpus entry: the sum of
    /// per-term contributions, one per occurrence.
    pub fn document_score(&self, document: &[String], target: &DocumentStats) -> f32 {
        document
            .iter()
            .map(|term| self.term_score(term, target))
            .sum()
    }

    /// Ad-hoc BM25 similarity of `document_a` scored against `document_b`.
    ///
    /// Neither sequence needs to come from the corpus. Terms outside the
    /// corpus vocabulary fall back to the IDF of a term with document
    /// frequency 1. The length normalization mixes `document_b`'s own
    /// length with the corpus average document length.
    pub fn similarity(&self, document_a: &[String], document_b: &[String]) -> f32 {
        let mut frequencies: AHashMap<&str, u32> = AHashMap::new();
        for term in document_b {
            *frequencies.entry(term.as_str()).or_insert(0) += 1;
        }

        let default_idf =
            (self.stats.corpus_size as f32 - 1.0 + 0.5).ln() - (1.0f32 + 0.5).ln();
        let doc_len = document_b.len() as f32;

        let mut score = 0.0;
        for term in document_a {
            let Some(&tf) = frequencies.get(term.as_str()) else {
                continue;
            };
            let idf = self.stats.idf(term).unwrap_or(default_idf);
            score += self.weighted_term_frequency(idf, tf as f32, doc_len);
        }
        score
    }

    /// The canonical BM25 weight:
    /// `idf * tf * (k1 + 1) / (tf + k1 * (1 - b + b * doc_len / avgdl))`.
    fn weighted_term_frequency(&self, idf: f32, tf: f32, doc_len: f32) -> f32 {
        let k1 = self.params.k1;
        let b = self.params.b;
        let avgdl = self.stats.avgdl as f32;

        idf * tf * (k1 + 1.0) / (tf + k1 * (1.0 - b + b * doc_len / avgdl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::CorpusStats;

    fn test_corpus() -> Vec<Vec<String>> {
        vec![
            vec!["black", "cat", "white", "cat"],
            vec!["cat", "outer", "space"],
            vec!["wag", "dog"],
        ]
        .into_iter()
        .map(|doc| doc.into_iter().map(String::from).collect())
        .collect()
    }

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_default_params() {
        let params = Bm25Params::default();
        assert_eq!(params.k1, 1.5);
        assert_eq!(params.b, 0.75);
        assert_eq!(params.epsilon, 0.25);
    }

    #[test]
    fn test_term_score() {
        let params = Bm25Params::default();
        let (stats, documents) = CorpusStats::build(&test_corpus(), params.epsilon).unwrap();
        let scorer = Bm25Scorer::new(&stats, &params);

        // Document 0: tf("cat") = 2, length 4.
        let score = scorer.term_score("cat", &documents[0]);
        assert!((score - 0.118).abs() < 1e-3);

        // Document 1: tf("cat") = 1, length 3.
        let score = scorer.term_score("cat", &documents[1]);
        assert!((score - 0.091).abs() < 1e-3);

        // Absent term contributes nothing.
        assert_eq!(scorer.term_score("cat", &documents[2]), 0.0);
        assert_eq!(scorer.term_score("nonexistentword", &documents[0]), 0.0);
    }

    #[test]
    fn test_document_score_sums_occurrences() {
        let params = Bm25Params::default();
        let (stats, documents) = CorpusStats::build(&test_corpus(), params.epsilon).unwrap();
        let scorer = Bm25Scorer::new(&stats, &params);

        let single = scorer.document_score(&terms(&["cat"]), &documents[0]);
        let doubled = scorer.document_score(&terms(&["cat", "cat"]), &documents[0]);
        assert!((doubled - 2.0 * single).abs() < 1e-6);

        let mixed = scorer.document_score(&terms(&["black", "cat"]), &documents[0]);
        let black = scorer.document_score(&terms(&["black"]), &documents[0]);
        assert!((mixed - (black + single)).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_known_terms() {
        let params = Bm25Params::default();
        let (stats, _) = CorpusStats::build(&test_corpus(), params.epsilon).unwrap();
        let scorer = Bm25Scorer::new(&stats, &params);

        // Scoring ["cat"] against corpus document 1's terms reproduces the
        // direct score: same tf, same length, same corpus avgdl.
        let score = scorer.similarity(&terms(&["cat"]), &terms(&["cat", "outer", "space"]));
        assert!((score - 0.091).abs() < 1e-3);
    }

    #[test]
    fn test_similarity_out_of_vocabulary() {
        let params = Bm25Params::default();
        let (stats, _) = CorpusStats::build(&test_corpus(), params.epsilon).unwrap();
        let scorer = Bm25Scorer::new(&stats, &params);

        // Both sequences share a term the corpus has never seen; the
        // default (df = 1) IDF applies and the score is positive.
        let score = scorer.similarity(&terms(&["quark"]), &terms(&["quark", "dog"]));
        assert!(score > 0.0);

        // No overlap at all scores zero.
        let score = scorer.similarity(&terms(&["quark"]), &terms(&["dog"]));
        assert_eq!(score, 0.0);

        // Empty sequences score zero.
        assert_eq!(scorer.similarity(&[], &terms(&["dog"])), 0.0);
        assert_eq!(scorer.similarity(&terms(&["dog"]), &[]), 0.0);
    }

    #[test]
    fn test_similarity_is_asymmetric() {
        let params = Bm25Params::default();
        let (stats, _) = CorpusStats::build(&test_corpus(), params.epsilon).unwrap();
        let scorer = Bm25Scorer::new(&stats, &params);

        // document_b supplies the frequency map and the local length, so
        // swapping the arguments changes the score in general.
        let a = terms(&["cat", "cat", "dog"]);
        let b = terms(&["cat", "space"]);
        let ab = scorer.similarity(&a, &b);
        let ba = scorer.similarity(&b, &a);
        assert!(ab > 0.0);
        assert!(ba > 0.0);
        assert!((ab - ba).abs() > 1e-6);
    }
}
