//! Top-k retrieval over the inverted score index.
//!
//! Query-term contributions are accumulated into a per-document score map,
//! then the k best documents are selected with a bounded binary heap
//! (O(D log k) over the D documents touched). Ties are broken
//! deterministically: equal scores order by lower document id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::index::ScoreIndex;

/// A ranked corpus entry returned by top-k retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched document's terms.
    pub document: Vec<String>,

    /// Stable corpus position of the document.
    pub doc_id: u32,

    /// Accumulated BM25 score across query terms.
    pub score: f32,
}

/// A scored document for use in the heap.
#[derive(Debug, Clone, Copy)]
struct ScoredDoc {
    doc_id: u32,
    score: f32,
}

impl PartialEq for ScoredDoc {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.doc_id == other.doc_id
    }
}

impl Eq for ScoredDoc {}

impl PartialOrd for ScoredDoc {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredDoc {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap over ranking order: the worst kept entry sits on top.
        // Lower score ranks worse; on equal scores the higher doc id ranks
        // worse, so equal-score results come back in doc id order.
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// A collector that keeps the k best documents by accumulated score.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of documents to keep.
    k: usize,

    /// Kept hits (min-heap over ranking order).
    hits: BinaryHeap<ScoredDoc>,
}

impl TopDocsCollector {
    /// Create a collector keeping at most `k` documents.
    pub fn new(k: usize) -> Self {
        TopDocsCollector {
            k,
            hits: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// Offer a scored document to the collection.
    pub fn collect(&mut self, doc_id: u32, score: f32) {
        let candidate = ScoredDoc { doc_id, score };

        if self.hits.len() < self.k {
            self.hits.push(candidate);
        } else if let Some(worst) = self.hits.peek() {
            if candidate.cmp(worst) == Ordering::Less {
                self.hits.pop();
                self.hits.push(candidate);
            }
        }
    }

    /// Consume the collector, returning (doc id, score) pairs ranked best
    /// first.
    pub fn into_sorted(self) -> Vec<(u32, f32)> {
        let mut results = self.hits.into_vec();
        results.sort();
        results.into_iter().map(|doc| (doc.doc_id, doc.score)).collect()
    }
}

/// Accumulate per-document scores for `query` over the index and select
/// the k highest, ranked (score desc, doc id asc).
///
/// Query terms absent from the index contribute nothing; duplicated query
/// terms contribute once per occurrence. Documents sharing no term with
/// the query are never returned.
pub fn top_k(index: &ScoreIndex, query: &[String], k: usize) -> Vec<(u32, f32)> {
    let mut accumulated: AHashMap<u32, f32> = AHashMap::new();
    for term in query {
        if let Some(postings) = index.postings(term) {
            for (&doc_id, &score) in postings {
                *accumulated.entry(doc_id).or_insert(0.0) += score;
            }
        }
    }

    let mut collector = TopDocsCollector::new(k);
    for (doc_id, score) in accumulated {
        collector.collect(doc_id, score);
    }
    collector.into_sorted()
}
