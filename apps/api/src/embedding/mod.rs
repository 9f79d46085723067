/// Embedding collaborators: the only place document text becomes a vector.
///
/// Built once at startup and carried in `AppState` as `Arc<dyn Embedder>`.
/// The scoring core never constructs an embedder itself.
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::EmbeddingBackend;

pub mod fastembed;
pub mod hash;
pub mod http;

pub use self::fastembed::FastEmbedEmbedder;
pub use hash::HashEmbedder;
pub use http::HttpEmbedder;

/// Fixed-length vector produced by an embedder.
pub type EmbeddingVector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Embedding service unavailable after {retries} attempts")]
    RetriesExhausted { retries: u32 },

    #[error("Embedding service returned no vector")]
    EmptyResponse,

    #[error("Embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Embedding model error: {0}")]
    Model(String),

    #[error("Embedding task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Text → vector. Implementations must return the same vector for the same text
/// within one process and a fixed dimensionality across calls.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Short backend label for logs ("fastembed" | "hash" | "http").
    fn name(&self) -> &'static str;

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError>;
}

/// Builds the configured embedder. The fastembed backend loads (and may download)
/// its model here, so call this off the async workers.
pub fn create_embedder(backend: &EmbeddingBackend) -> anyhow::Result<Arc<dyn Embedder>> {
    let embedder: Arc<dyn Embedder> = match backend {
        EmbeddingBackend::FastEmbed { cache_dir } => {
            Arc::new(FastEmbedEmbedder::new(cache_dir.clone())?)
        }
        EmbeddingBackend::Hash { dimension } => Arc::new(HashEmbedder::new(*dimension)),
        EmbeddingBackend::Http { api_url } => Arc::new(HttpEmbedder::new(api_url.clone())?),
    };
    Ok(embedder)
}
