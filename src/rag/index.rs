//! In-memory similarity index over chunk embeddings.
//!
//! Built fresh for every request and dropped with it; nothing is shared or
//! persisted across requests.

use crate::core::errors::PipelineError;
use crate::llm::Embedder;

use super::chunker::TextChunk;

/// Pairs each chunk with its embedding and answers nearest-neighbor
/// queries by cosine similarity.
#[derive(Debug)]
pub struct SimilarityIndex {
    chunks: Vec<TextChunk>,
    vectors: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Embeds all chunks in one batched call and builds the index.
    pub async fn build(
        embedder: &dyn Embedder,
        chunks: Vec<TextChunk>,
    ) -> Result<Self, PipelineError> {
        let inputs: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();

        let vectors = embedder
            .embed(&inputs)
            .await
            .map_err(|err| PipelineError::IndexBuild(err.to_string()))?;

        if vectors.len() != chunks.len() {
            return Err(PipelineError::IndexBuild(format!(
                "embedding count mismatch: {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        tracing::debug!(chunks = chunks.len(), "built similarity index");
        Ok(Self { chunks, vectors })
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, index: usize) -> &TextChunk {
        &self.chunks[index]
    }

    /// Scores every chunk against the query vector and returns
    /// `(chunk index, score)` pairs ordered by non-increasing score.
    pub fn rank(&self, query: &[f32]) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| (index, cosine_similarity(query, vector)))
            .collect();

        scored.sort_by(|left, right| {
            right
                .1
                .partial_cmp(&left.1)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denom = norm_a * norm_b;
    if denom <= f32::EPSILON {
        return 0.0;
    }

    (dot / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use async_trait::async_trait;

    struct CannedEmbedder {
        vectors: Vec<Vec<f32>>,
    }

    #[async_trait]
    impl Embedder for CannedEmbedder {
        async fn embed(&self, _inputs: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
            Ok(self.vectors.clone())
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _inputs: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
            Err(LlmError::Api("quota exhausted".to_string()))
        }
    }

    fn chunk(text: &str, index: usize) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            start_offset: 0,
            index,
        }
    }

    fn approx_eq(left: f32, right: f32) -> bool {
        (left - right).abs() < 1e-5
    }

    #[test]
    fn cosine_is_one_for_identical_vectors() {
        let vec = [1.0, 2.0, 3.0, 4.0];
        assert!(approx_eq(cosine_similarity(&vec, &vec), 1.0));
    }

    #[test]
    fn cosine_is_zero_for_orthogonal_vectors() {
        assert!(approx_eq(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0));
    }

    #[test]
    fn cosine_handles_mismatched_and_zero_vectors() {
        assert!(approx_eq(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0));
        assert!(approx_eq(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0));
    }

    #[tokio::test]
    async fn rank_returns_non_increasing_scores() {
        let embedder = CannedEmbedder {
            vectors: vec![vec![0.8, 0.2], vec![0.1, 0.9], vec![0.9, 0.0]],
        };
        let chunks = vec![chunk("a", 0), chunk("b", 1), chunk("c", 2)];
        let index = SimilarityIndex::build(&embedder, chunks).await.unwrap();

        let ranked = index.rank(&[1.0, 0.0]);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].0, 2);
        assert_eq!(ranked[2].0, 1);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[tokio::test]
    async fn vector_count_mismatch_fails_the_build() {
        let embedder = CannedEmbedder {
            vectors: vec![vec![1.0, 0.0]],
        };
        let chunks = vec![chunk("a", 0), chunk("b", 1)];

        let err = SimilarityIndex::build(&embedder, chunks).await.unwrap_err();
        assert!(matches!(err, PipelineError::IndexBuild(_)));
    }

    #[tokio::test]
    async fn embedding_failure_fails_the_build() {
        let err = SimilarityIndex::build(&FailingEmbedder, vec![chunk("a", 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::IndexBuild(_)));
    }
}
