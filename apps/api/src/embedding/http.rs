//! Client for an external sentence-embedding server
//! (text-embeddings-inference style: `POST {"inputs": [...]}` → `[[f32]]`).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::{Embedder, EmbeddingError, EmbeddingVector};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    inputs: Vec<&'a str>,
}

#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    api_url: String,
    retry_base_delay: Duration,
}

impl HttpEmbedder {
    pub fn new(api_url: String) -> Result<Self, EmbeddingError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_url,
            retry_base_delay: RETRY_BASE_DELAY,
        })
    }

    /// Overrides the first backoff delay; later retries double it.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Retries on 429, 5xx and transport errors with exponential backoff.
    async fn request(&self, text: &str) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
        let body = EmbedRequest { inputs: vec![text] };
        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s with the default base
                let delay = self.retry_base_delay * (1 << (attempt - 1));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.api_url).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, message);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let raw = response.text().await?;
            return parse_embeddings(&raw);
        }

        Err(last_error.unwrap_or(EmbeddingError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        let vector = self
            .request(text)
            .await?
            .into_iter()
            .next()
            .ok_or(EmbeddingError::EmptyResponse)?;
        debug!(dimension = vector.len(), "Embedding received");
        Ok(vector)
    }
}

fn parse_embeddings(raw: &str) -> Result<Vec<EmbeddingVector>, EmbeddingError> {
    let vectors: Vec<EmbeddingVector> = serde_json::from_str(raw)?;
    if vectors.first().map_or(true, |v| v.is_empty()) {
        return Err(EmbeddingError::EmptyResponse);
    }
    Ok(vectors)
}
