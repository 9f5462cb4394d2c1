//! Retrieval pipeline: chunk, index, retrieve, generate.
//!
//! One pass per request. The whole chain is rebuilt for every question and
//! torn down with the request; there is no cross-request cache or index
//! reuse.

mod chunker;
mod index;
mod policy;

pub use chunker::{split_text, ChunkerConfig, TextChunk};
pub use index::SimilarityIndex;
pub use policy::select_relevant;

use crate::core::errors::PipelineError;
use crate::llm::{Embedder, Generator};

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    pub chunk: TextChunk,
    pub score: f32,
}

/// Retrieval parameters.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// Number of nearest chunks to consider.
    pub top_k: usize,
    /// Minimum similarity score a result must exceed to be kept.
    pub score_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            score_threshold: 0.3,
        }
    }
}

/// Embeds the question and returns the most relevant chunks, never fewer
/// than one for a non-empty index (see [`select_relevant`]).
///
/// Fails with `NoResults` only when the index itself is empty. A failure of
/// the question-embedding call surfaces as `IndexBuild`, the same external
/// embedding service that built the index.
pub async fn retrieve(
    embedder: &dyn Embedder,
    index: &SimilarityIndex,
    question: &str,
    config: &RetrievalConfig,
) -> Result<Vec<ScoredChunk>, PipelineError> {
    if index.is_empty() {
        return Err(PipelineError::NoResults);
    }

    let vectors = embedder
        .embed(&[question.to_string()])
        .await
        .map_err(|err| PipelineError::IndexBuild(format!("failed to embed question: {}", err)))?;
    let query = vectors.into_iter().next().ok_or_else(|| {
        PipelineError::IndexBuild("embedding service returned no vector for the question".to_string())
    })?;

    let ranked = index.rank(&query);
    let selected = select_relevant(&ranked, config.top_k, config.score_threshold);

    Ok(selected
        .into_iter()
        .map(|(chunk_index, score)| ScoredChunk {
            chunk: index.chunk(chunk_index).clone(),
            score,
        })
        .collect())
}

/// Runs the full pipeline over already-extracted document text.
pub async fn answer_question(
    embedder: &dyn Embedder,
    generator: &dyn Generator,
    text: &str,
    question: &str,
    chunker: &ChunkerConfig,
    retrieval: &RetrievalConfig,
) -> Result<String, PipelineError> {
    let chunks = split_text(text, chunker);
    tracing::debug!(chunks = chunks.len(), "split extracted text");

    let index = SimilarityIndex::build(embedder, chunks).await?;
    let retrieved = retrieve(embedder, &index, question, retrieval).await?;
    tracing::debug!(
        retrieved = retrieved.len(),
        indexed = index.len(),
        "retrieved context chunks"
    );

    let context = retrieved
        .iter()
        .map(|scored| scored.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    generator
        .generate(&context, question)
        .await
        .map_err(|err| PipelineError::Generation(err.to_string()))
}
