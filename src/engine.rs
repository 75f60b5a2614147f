//! The BM25 ranking engine: public facade over statistics, scoring,
//! indexing, and retrieval.

use crate::error::{Rank25Error, Result};
use crate::index::ScoreIndex;
use crate::scoring::{Bm25Params, Bm25Scorer};
use crate::search::{self, SearchHit};
use crate::stats::{CorpusStats, DocumentStats};

/// In-memory BM25 ranking engine over a fixed tokenized corpus.
///
/// All derived state (corpus statistics, per-document statistics, the
/// inverted score index) is built eagerly at construction and immutable
/// afterwards, so a shared `&Bm25Engine` can serve concurrent read-only
/// queries without locking.
#[derive(Debug, Clone)]
pub struct Bm25Engine {
    corpus: Vec<Vec<String>>,
    params: Bm25Params,
    stats: CorpusStats,
    documents: Vec<DocumentStats>,
    index: ScoreIndex,
}

impl Bm25Engine {
    /// Build an engine over `corpus` with the default BM25 parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::InvalidInput`] if the corpus is empty or
    /// contains no terms.
    pub fn new(corpus: Vec<Vec<String>>) -> Result<Self> {
        Self::with_params(corpus, Bm25Params::default())
    }

    /// Build an engine with explicit BM25 parameters.
    pub fn with_params(corpus: Vec<Vec<String>>, params: Bm25Params) -> Result<Self> {
        let (stats, documents) = CorpusStats::build(&corpus, params.epsilon)?;
        let index = {
            let scorer = Bm25Scorer::new(&stats, &params);
            ScoreIndex::build(&scorer, &documents)
        };

        Ok(Bm25Engine {
            corpus,
            params,
            stats,
            documents,
            index,
        })
    }

    /// Score `document` against the corpus entry at `doc_id`.
    ///
    /// Duplicated terms in `document` contribute once per occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::OutOfRange`] if `doc_id` is not a valid
    /// corpus position.
    pub fn score(&self, document: &[String], doc_id: u32) -> Result<f32> {
        let target = self.document_stats(doc_id)?;
        Ok(self.scorer().document_score(document, target))
    }

    /// Score `document` against an explicit set of candidate corpus
    /// entries. The returned scores align with `doc_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::OutOfRange`] if any id is not a valid corpus
    /// position.
    pub fn scores(&self, document: &[String], doc_ids: &[u32]) -> Result<Vec<f32>> {
        let scorer = self.scorer();
        doc_ids
            .iter()
            .map(|&doc_id| {
                let target = self.document_stats(doc_id)?;
                Ok(scorer.document_score(document, target))
            })
            .collect()
    }

    /// Score `document` against every corpus entry and return the
    /// (doc id, score) pairs with strictly positive score, in corpus
    /// order.
    pub fn scores_positive(&self, document: &[String]) -> Vec<(u32, f32)> {
        let scorer = self.scorer();
        self.documents
            .iter()
            .enumerate()
            .filter_map(|(doc_id, target)| {
                let score = scorer.document_score(document, target);
                (score > 0.0).then_some((doc_id as u32, score))
            })
            .collect()
    }

    /// Ad-hoc BM25 similarity of `document_a` scored against `document_b`;
    /// neither needs to come from the corpus. See
    /// [`Bm25Scorer::similarity`] for the exact semantics.
    pub fn similarity(&self, document_a: &[String], document_b: &[String]) -> f32 {
        self.scorer().similarity(document_a, document_b)
    }

    /// Return the up-to-k corpus entries most similar to `query`, ranked
    /// by accumulated index score descending with ties broken by lower
    /// document id. Entries sharing no term with the query are never
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::InvalidArgument`] if `k` is 0.
    pub fn top_k(&self, query: &[String], k: usize) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(Rank25Error::invalid_argument("k must be at least 1"));
        }

        let hits = search::top_k(&self.index, query, k)
            .into_iter()
            .map(|(doc_id, score)| SearchHit {
                document: self.corpus[doc_id as usize].clone(),
                doc_id,
                score,
            })
            .collect();
        Ok(hits)
    }

    /// Number of documents in the corpus.
    pub fn corpus_size(&self) -> usize {
        self.stats.corpus_size
    }

    /// Average document length.
    pub fn avgdl(&self) -> f64 {
        self.stats.avgdl
    }

    /// The engine's BM25 parameters.
    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    /// Floored IDF for `term`, or `None` if the term never occurs in the
    /// corpus.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.stats.idf(term)
    }

    /// Mean of the raw (pre-floor) IDF values over the vocabulary.
    pub fn average_idf(&self) -> f32 {
        self.stats.average_idf
    }

    /// The corpus entry at `doc_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::OutOfRange`] if `doc_id` is not a valid
    /// corpus position.
    pub fn document(&self, doc_id: u32) -> Result<&[String]> {
        self.document_stats(doc_id)?;
        Ok(&self.corpus[doc_id as usize])
    }

    /// The precomputed inverted score index.
    pub fn index(&self) -> &ScoreIndex {
        &self.index
    }

    fn scorer(&self) -> Bm25Scorer<'_> {
        Bm25Scorer::new(&self.stats, &self.params)
    }

    fn document_stats(&self, doc_id: u32) -> Result<&DocumentStats> {
        self.documents.get(doc_id as usize).ok_or_else(|| {
            Rank25Error::out_of_range(format!(
                "document id {} (corpus size {})",
                doc_id, self.stats.corpus_size
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_engine_construction() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        assert_eq!(engine.corpus_size(), 3);
        assert!((engine.avgdl() - 3.0).abs() < 1e-9);
        assert_eq!(engine.params().k1, 1.5);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let result = Bm25Engine::new(Vec::new());
        assert!(matches!(result, Err(Rank25Error::InvalidInput(_))));
    }

    #[test]
    fn test_score() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        assert!((engine.score(&terms(&["cat"]), 0).unwrap() - 0.118).abs() < 1e-3);
        assert!((engine.score(&terms(&["cat"]), 1).unwrap() - 0.091).abs() < 1e-3);
        assert_eq!(engine.score(&terms(&["cat"]), 2).unwrap(), 0.0);
    }

    #[test]
    fn test_score_out_of_range() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        let result = engine.score(&terms(&["cat"]), 3);
        assert!(matches!(result, Err(Rank25Error::OutOfRange(_))));

        let result = engine.scores(&terms(&["cat"]), &[0, 3]);
        assert!(matches!(result, Err(Rank25Error::OutOfRange(_))));
    }

    #[test]
    fn test_scores_aligned_with_ids() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        let scores = engine.scores(&terms(&["cat"]), &[1, 0]).unwrap();
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 0.091).abs() < 1e-3);
        assert!((scores[1] - 0.118).abs() < 1e-3);
    }

    #[test]
    fn test_scores_positive() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        let positive = engine.scores_positive(&terms(&["cat"]));
        assert_eq!(positive.len(), 2);
        // Corpus order, not sorted by score.
        assert_eq!(positive[0].0, 0);
        assert_eq!(positive[1].0, 1);

        assert!(engine.scores_positive(&terms(&["nonexistentword"])).is_empty());
    }

    #[test]
    fn test_top_k() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        let hits = engine.top_k(&terms(&["cat"]), 1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].doc_id, 0);
        assert_eq!(hits[0].document, terms(&["black", "cat", "white", "cat"]));
        assert!((hits[0].score - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_top_k_rejects_zero_k() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        let result = engine.top_k(&terms(&["cat"]), 0);
        assert!(matches!(result, Err(Rank25Error::InvalidArgument(_))));
    }

    #[test]
    fn test_document_accessor() {
        let engine = Bm25Engine::new(test_corpus()).unwrap();

        assert_eq!(engine.document(2).unwrap(), terms(&["wag", "dog"]).as_slice());
        assert!(matches!(
            engine.document(9),
            Err(Rank25Error::OutOfRange(_))
        ));
    }
}
