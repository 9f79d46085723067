use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::scoring::fusion::FusionWeights;

/// Which embedding collaborator backs semantic scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingBackend {
    /// In-process all-MiniLM-L6-v2 sentence embeddings via ONNX Runtime.
    /// The model is downloaded into `cache_dir` (or fastembed's default) on first start.
    FastEmbed { cache_dir: Option<PathBuf> },
    /// In-process feature hashing. Deterministic, no model download.
    Hash { dimension: usize },
    /// External sentence-embedding server reached over HTTP.
    Http { api_url: String },
}

/// Application configuration loaded from environment variables.
/// Every value has a default except `EMBEDDING_API_URL` when the HTTP backend is selected.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cors_allow_origin: String,
    pub embedding: EmbeddingBackend,
    pub weights: FusionWeights,
    pub preview_chars: usize,
    pub max_upload_bytes: usize,
}

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_EMBEDDING_BACKEND: &str = "fastembed";
const DEFAULT_EMBEDDING_DIMENSION: usize = 384;
const DEFAULT_PREVIEW_CHARS: usize = 1000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source. `lookup` returns `None` for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let embedding = match env
            .optional("EMBEDDING_BACKEND")
            .unwrap_or_else(|| DEFAULT_EMBEDDING_BACKEND.to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "hash" => {
                let dimension = env.parse("EMBEDDING_DIMENSION", DEFAULT_EMBEDDING_DIMENSION)?;
                if dimension == 0 {
                    bail!("EMBEDDING_DIMENSION must be greater than zero");
                }
                EmbeddingBackend::Hash { dimension }
            }
            "fastembed" => EmbeddingBackend::FastEmbed {
                cache_dir: env.optional("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            },
            "http" => EmbeddingBackend::Http {
                api_url: env.require("EMBEDDING_API_URL")?,
            },
            other => {
                bail!("EMBEDDING_BACKEND must be 'fastembed', 'hash' or 'http', got '{other}'")
            }
        };

        let defaults = FusionWeights::default();
        let weights = FusionWeights::new(
            env.parse("SEMANTIC_WEIGHT", defaults.semantic)?,
            env.parse("SKILL_WEIGHT", defaults.skill)?,
        )?;

        Ok(Config {
            port: env
                .parse("PORT", DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: env.optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            cors_allow_origin: env
                .optional("CORS_ALLOW_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            embedding,
            weights,
            preview_chars: env.parse("PREVIEW_CHARS", DEFAULT_PREVIEW_CHARS)?,
            max_upload_bytes: env.parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            cors_allow_origin: DEFAULT_CORS_ORIGIN.to_string(),
            embedding: EmbeddingBackend::FastEmbed { cache_dir: None },
            weights: FusionWeights::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Variable lookup with blank values treated as unset.
struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn require(&self, key: &str) -> Result<String> {
        self.optional(key)
            .with_context(|| format!("Required environment variable '{key}' is not set"))
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match self.optional(key) {
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
            None => Ok(default),
        }
    }
}
