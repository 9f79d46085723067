use std::sync::Arc;

use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::scoring::Analyzer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Vocabulary matchers, embedder and fusion weights, built once in `main`.
    pub analyzer: Analyzer,
    /// Pluggable document reader. Default: PdfTextExtractor.
    pub text_extractor: Arc<dyn TextExtractor>,
}
