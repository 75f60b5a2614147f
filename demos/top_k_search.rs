//! Top-k search example - builds an engine over a small corpus and walks
//! through scoring, similarity, and ranked retrieval.

use rank25::error::Result;
use rank25::prelude::*;

fn main() -> Result<()> {
    println!("=== rank25 Example - BM25 Scoring and Top-K Retrieval ===\n");

    let corpus: Vec<Vec<String>> = [
        vec!["rust", "is", "a", "systems", "programming", "language"],
        vec!["rust", "programming", "values", "memory", "safety"],
        vec!["python", "is", "a", "scripting", "language"],
        vec!["search", "engines", "rank", "documents", "by", "relevance"],
    ]
    .into_iter()
    .map(|doc| doc.into_iter().map(String::from).collect())
    .collect();

    let engine = Bm25Engine::new(corpus)?;
    println!(
        "Built engine over {} documents (avgdl = {:.2})\n",
        engine.corpus_size(),
        engine.avgdl()
    );

    // Direct scoring against a single corpus entry.
    let query: Vec<String> = vec!["rust".to_string(), "language".to_string()];
    for doc_id in 0..engine.corpus_size() as u32 {
        let score = engine.score(&query, doc_id)?;
        println!("score(query, doc {doc_id}) = {score:.4}");
    }

    // Positive scores only, in corpus order.
    let positive = engine.scores_positive(&query);
    println!("\nDocuments with positive score: {positive:?}");

    // Ranked retrieval through the precomputed index.
    println!("\nTop 2 documents for {query:?}:");
    for hit in engine.top_k(&query, 2)? {
        println!(
            "  doc {} (score {:.2}): {}",
            hit.doc_id,
            hit.score,
            hit.document.join(" ")
        );
    }

    // Ad-hoc similarity between two documents outside the corpus.
    let a: Vec<String> = vec!["memory".to_string(), "safety".to_string()];
    let b: Vec<String> = vec!["memory".to_string(), "safety".to_string(), "first".to_string()];
    println!("\nsimilarity(a, b) = {:.4}", engine.similarity(&a, &b));

    Ok(())
}
