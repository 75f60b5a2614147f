//! # rank25
//!
//! A fast, lightweight Okapi BM25 ranking library for Rust.
//!
//! ## Features
//!
//! - Corpus statistics derived in a single construction pass
//! - Canonical BM25 per-term scoring with tunable k1/b parameters
//! - Precomputed inverted score index for O(1) average per-term lookup
//! - Top-k retrieval with deterministic tie-breaking
//! - Ad-hoc similarity between arbitrary term sequences
//!
//! ## Example
//!
//! ```
//! use rank25::prelude::*;
//!
//! let corpus: Vec<Vec<String>> = vec![
//!     vec!["hello".into(), "world".into()],
//!     vec!["goodbye".into(), "world".into()],
//! ];
//!
//! let engine = Bm25Engine::new(corpus)?;
//! let hits = engine.top_k(&["hello".into()], 1)?;
//! assert_eq!(hits[0].doc_id, 0);
//! # Ok::<(), rank25::error::Rank25Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod index;
pub mod labeled;
pub mod scoring;
pub mod search;
pub mod stats;

pub use crate::engine::Bm25Engine;
pub use crate::error::{Rank25Error, Result};
pub use crate::scoring::{Bm25Params, Bm25Scorer};
pub use crate::search::SearchHit;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::engine::Bm25Engine;
    pub use crate::error::{Rank25Error, Result};
    pub use crate::labeled::{DocumentLabel, LabeledBm25Engine, LabeledHit};
    pub use crate::scoring::Bm25Params;
    pub use crate::search::SearchHit;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
