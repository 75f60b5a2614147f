//! Labeled corpus decoration over the core engine.
//!
//! Callers that key their documents by external ids (and optionally group
//! them into categories) attach one [`DocumentLabel`] per corpus entry.
//! The scoring mathematics is entirely the core [`Bm25Engine`]'s; this
//! layer only maps corpus positions back to caller-side identity.

use serde::{Deserialize, Serialize};

use crate::engine::Bm25Engine;
use crate::error::{Rank25Error, Result};
use crate::scoring::Bm25Params;

/// Caller-side identity of a corpus entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLabel {
    /// External id the caller knows the document by.
    pub external_id: String,

    /// Optional category tag.
    pub category: Option<String>,
}

impl DocumentLabel {
    /// Create a label with no category.
    pub fn new<S: Into<String>>(external_id: S) -> Self {
        DocumentLabel {
            external_id: external_id.into(),
            category: None,
        }
    }

    /// Attach a category tag.
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A ranked corpus entry decorated with its label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledHit {
    /// The entry's caller-side identity.
    pub label: DocumentLabel,

    /// Stable corpus position of the document.
    pub doc_id: u32,

    /// Accumulated BM25 score across query terms.
    pub score: f32,
}

/// A [`Bm25Engine`] whose corpus entries carry caller-supplied labels.
#[derive(Debug, Clone)]
pub struct LabeledBm25Engine {
    engine: Bm25Engine,
    labels: Vec<DocumentLabel>,
}

impl LabeledBm25Engine {
    /// Build a labeled engine with the default BM25 parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::InvalidArgument`] if the label count does
    /// not match the corpus size, or any construction error of the core
    /// engine.
    pub fn new(corpus: Vec<Vec<String>>, labels: Vec<DocumentLabel>) -> Result<Self> {
        Self::with_params(corpus, labels, Bm25Params::default())
    }

    /// Build a labeled engine with explicit BM25 parameters.
    pub fn with_params(
        corpus: Vec<Vec<String>>,
        labels: Vec<DocumentLabel>,
        params: Bm25Params,
    ) -> Result<Self> {
        if labels.len() != corpus.len() {
            return Err(Rank25Error::invalid_argument(format!(
                "label count {} does not match corpus size {}",
                labels.len(),
                corpus.len()
            )));
        }

        let engine = Bm25Engine::with_params(corpus, params)?;
        Ok(LabeledBm25Engine { engine, labels })
    }

    /// Return the up-to-k entries most similar to `query`, decorated with
    /// their labels. Ranking semantics are [`Bm25Engine::top_k`]'s.
    pub fn top_k(&self, query: &[String], k: usize) -> Result<Vec<LabeledHit>> {
        let hits = self
            .engine
            .top_k(query, k)?
            .into_iter()
            .map(|hit| LabeledHit {
                label: self.labels[hit.doc_id as usize].clone(),
                doc_id: hit.doc_id,
                score: hit.score,
            })
            .collect();
        Ok(hits)
    }

    /// The label attached to the corpus entry at `doc_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Rank25Error::OutOfRange`] if `doc_id` is not a valid
    /// corpus position.
    pub fn label(&self, doc_id: u32) -> Result<&DocumentLabel> {
        self.labels.get(doc_id as usize).ok_or_else(|| {
            Rank25Error::out_of_range(format!(
                "document id {} (corpus size {})",
                doc_id,
                self.labels.len()
            ))
        })
    }

    /// The undecorated core engine, for direct scoring operations.
    pub fn engine(&self) -> &Bm25Engine {
        &self.engine
    }
}
