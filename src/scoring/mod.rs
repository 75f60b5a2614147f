//! Scoring functions for ranking corpus documents.

pub mod bm25;

pub use self::bm25::{Bm25Params, Bm25Scorer};
