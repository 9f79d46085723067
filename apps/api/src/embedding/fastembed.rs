//! In-process sentence embeddings with all-MiniLM-L6-v2 on ONNX Runtime.
//!
//! The model is loaded once at startup and shared behind an `Arc`. Inference is
//! CPU-bound, so every call runs on the blocking pool.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ::fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info};

use super::{Embedder, EmbeddingError, EmbeddingVector};

pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";
pub const EMBEDDING_DIM: usize = 384;

#[derive(Clone)]
pub struct FastEmbedEmbedder {
    model: Arc<TextEmbedding>,
}

impl FastEmbedEmbedder {
    /// Loads the model, downloading it into `cache_dir` on first use.
    pub fn new(cache_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);
        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir);
        }
        let model = TextEmbedding::try_new(options)?;
        info!(model = DEFAULT_MODEL, dimension = EMBEDDING_DIM, "Embedding model loaded");
        Ok(Self {
            model: Arc::new(model),
        })
    }
}

#[async_trait]
impl Embedder for FastEmbedEmbedder {
    fn name(&self) -> &'static str {
        "fastembed"
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        let model = Arc::clone(&self.model);
        let text = text.to_owned();
        let vectors = tokio::task::spawn_blocking(move || {
            model
                .embed(vec![text], None)
                .map_err(|e| EmbeddingError::Model(e.to_string()))
        })
        .await??;

        let vector = vectors
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or(EmbeddingError::EmptyResponse)?;
        debug!(dimension = vector.len(), "Embedding computed");
        Ok(vector)
    }
}
