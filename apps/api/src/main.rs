mod config;
mod embedding;
mod errors;
mod extraction;
mod routes;
mod scoring;
mod state;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::create_embedder;
use crate::extraction::PdfTextExtractor;
use crate::routes::build_router;
use crate::scoring::{Analyzer, VocabularyStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting résumé match API v{}", env!("CARGO_PKG_VERSION"));

    // Compile vocabulary matchers once
    let vocabulary = Arc::new(
        VocabularyStore::with_default_skills().context("Failed to compile skill vocabulary")?,
    );
    if vocabulary.is_empty() {
        anyhow::bail!("Skill vocabulary is empty");
    }
    info!("Skill vocabulary loaded ({} phrases)", vocabulary.len());

    // Initialize embedding model; fastembed loads ONNX weights synchronously
    let backend = config.embedding.clone();
    let embedder = tokio::task::spawn_blocking(move || create_embedder(&backend))
        .await
        .context("Embedder initialization task failed")??;
    info!("Embedder initialized (backend: {})", embedder.name());

    info!(
        "Fusion weights: semantic={} skill={}",
        config.weights.semantic, config.weights.skill
    );

    let state = AppState {
        analyzer: Analyzer::new(vocabulary, embedder, config.weights),
        text_extractor: Arc::new(PdfTextExtractor),
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_allow_origin
                .parse::<HeaderValue>()
                .context("CORS_ALLOW_ORIGIN must be a valid header value")?,
        )
        .allow_methods(Any)
        .allow_headers(Any);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
