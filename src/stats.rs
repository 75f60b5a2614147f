//! Corpus statistics derived once at engine construction.
//!
//! A single pass over the corpus accumulates per-document term frequencies
//! and lengths; an aggregation pass derives document frequencies and the
//! smoothed inverse document frequency (IDF) table shared by all scoring
//! operations.

use ahash::AHashMap;

use crate::error::{Rank25Error, Result};

/// Statistics for a single corpus document.
#[derive(Debug, Clone)]
pub struct DocumentStats {
    /// Term frequencies within the document.
    pub term_frequencies: AHashMap<String, u32>,

    /// Document length (number of tokens).
    pub length: u32,
}

impl DocumentStats {
    /// Derive statistics from a tokenized document.
    pub fn from_terms(document: &[String]) -> Self {
        let mut term_frequencies = AHashMap::new();
        for term in document {
            *term_frequencies.entry(term.clone()).or_insert(0) += 1;
        }

        DocumentStats {
            term_frequencies,
            length: document.len() as u32,
        }
    }

    /// Frequency of `term` in this document, or 0 if absent.
    pub fn frequency(&self, term: &str) -> u32 {
        self.term_frequencies.get(term).copied().unwrap_or(0)
    }
}

/// Corpus-wide statistics shared by all scoring operations.
///
/// Immutable once built. The stored IDF table is already floored: terms
/// whose raw IDF came out negative (terms occurring in more than half of
/// the documents) hold `epsilon * average_idf` instead, where
/// `average_idf` is the mean of the raw values. If `average_idf` is
/// itself negative the floor is negative too; negative floors are kept
/// as-is, not clamped to zero.
#[derive(Debug, Clone)]
pub struct CorpusStats {
    /// Number of documents in the corpus.
    pub corpus_size: usize,

    /// Average document length.
    pub avgdl: f64,

    /// Document frequencies: term -> number of documents containing it.
    pub document_frequencies: AHashMap<String, u32>,

    /// Floored IDF table over the corpus vocabulary.
    pub idf: AHashMap<String, f32>,

    /// Mean of the raw (pre-floor) IDF values.
    pub average_idf: f32,
}

impl CorpusStats {
    /// Build corpus-wide and per-document statistics in one pass.
    ///
    /// `epsilon` is the multiplier applied to `average_idf` to floor
    /// negative IDF values.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::InvalidInput`] if the corpus is empty or
    /// contains no terms at all; both would force a division by zero
    /// downstream and are rejected before any computation.
    pub fn build(
        corpus: &[Vec<String>],
        epsilon: f32,
    ) -> Result<(CorpusStats, Vec<DocumentStats>)> {
        if corpus.is_empty() {
            return Err(Rank25Error::invalid_input("corpus must not be empty"));
        }

        let mut documents = Vec::with_capacity(corpus.len());
        let mut document_frequencies: AHashMap<String, u32> = AHashMap::new();
        let mut total_tokens = 0u64;

        for document in corpus {
            total_tokens += document.len() as u64;

            let stats = DocumentStats::from_terms(document);
            for term in stats.term_frequencies.keys() {
                *document_frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            documents.push(stats);
        }

        if document_frequencies.is_empty() {
            return Err(Rank25Error::invalid_input(
                "corpus contains no terms (every document is empty)",
            ));
        }

        let corpus_size = corpus.len();
        let avgdl = total_tokens as f64 / corpus_size as f64;

        // Raw IDF per term; terms occurring in more than half of the
        // documents come out negative and are floored afterwards. The sum
        // runs in sorted term order so repeated builds produce identical
        // statistics regardless of hash-map iteration order.
        let mut vocabulary: Vec<&String> = document_frequencies.keys().collect();
        vocabulary.sort();

        let mut idf: AHashMap<String, f32> = AHashMap::with_capacity(document_frequencies.len());
        let mut idf_sum = 0.0f32;
        let mut negative_idf_terms = Vec::new();

        for term in vocabulary {
            let df = document_frequencies.get(term).copied().unwrap_or(0);
            let value =
                (corpus_size as f32 - df as f32 + 0.5).ln() - (df as f32 + 0.5).ln();
            idf.insert(term.clone(), value);
            idf_sum += value;
            if value < 0.0 {
                negative_idf_terms.push(term.clone());
            }
        }

        let average_idf = idf_sum / idf.len() as f32;
        let eps = epsilon * average_idf;
        for term in negative_idf_terms {
            idf.insert(term, eps);
        }

        let stats = CorpusStats {
            corpus_size,
            avgdl,
            document_frequencies,
            idf,
            average_idf,
        };

        Ok((stats, documents))
    }

    /// Number of distinct terms across the corpus.
    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Floored IDF for `term`, or `None` if the term never occurs.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.idf.get(term).copied()
    }
}
