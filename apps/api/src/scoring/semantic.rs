//! Semantic similarity between two whole documents via an injected embedder.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::embedding::{Embedder, EmbeddingError};

/// Cosine similarity in [-1.0, 1.0]. Zero-magnitude vectors give 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

#[derive(Clone)]
pub struct SemanticScorer {
    embedder: Arc<dyn Embedder>,
}

impl SemanticScorer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    /// Embeds both texts concurrently and returns their cosine similarity.
    /// Blank text on either side scores 0.0 without calling the embedder.
    /// Any embedder failure fails the whole call; there is no fallback score.
    pub async fn score(&self, resume_text: &str, jd_text: &str) -> Result<f64, EmbeddingError> {
        if resume_text.trim().is_empty() || jd_text.trim().is_empty() {
            debug!(backend = self.embedder.name(), "Blank document; semantic similarity is zero");
            return Ok(0.0);
        }

        let (resume_vec, jd_vec) = tokio::try_join!(
            self.embedder.embed(resume_text),
            self.embedder.embed(jd_text)
        )?;

        if resume_vec.len() != jd_vec.len() {
            return Err(EmbeddingError::DimensionMismatch {
                left: resume_vec.len(),
                right: jd_vec.len(),
            });
        }

        let similarity = cosine_similarity(&resume_vec, &jd_vec);
        debug!(
            backend = self.embedder.name(),
            dimension = resume_vec.len(),
            similarity,
            "Semantic similarity computed"
        );
        Ok(similarity)
    }
}
