//! Feature-hashing embedder. Deterministic, training-free, runs in-process.
//!
//! Tokens are lowercase words (plus adjacent bigrams at half weight), hashed with
//! SipHash-1-3 under fixed keys into signed buckets, then L2-normalized.
//! Changing the keys or the tokenizer changes every vector.

use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use siphasher::sip::SipHasher13;

use super::{Embedder, EmbeddingError, EmbeddingVector};

const HASH_SEED_K0: u64 = 0x5eed_cafe_0123_4567;
const HASH_SEED_K1: u64 = 0x89ab_cdef_fedc_ba98;
const BIGRAM_WEIGHT: f32 = 0.5;

pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    #[cfg(test)]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn hash_token(token: &str, salt: u8) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        salt.hash(&mut hasher);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let idx = (Self::hash_token(feature, 0) % self.dimension as u64) as usize;
        let sign = if Self::hash_token(feature, 1) % 2 == 0 {
            1.0
        } else {
            -1.0
        };
        vector[idx] += sign * weight;
    }

    pub fn embed_sync(&self, text: &str) -> EmbeddingVector {
        let tokens = tokenize(text);
        let mut vector = vec![0.0f32; self.dimension];

        for token in &tokens {
            self.add_feature(&mut vector, token, 1.0);
        }
        for pair in tokens.windows(2) {
            let bigram = format!("{} {}", pair[0], pair[1]);
            self.add_feature(&mut vector, &bigram, BIGRAM_WEIGHT);
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    async fn embed(&self, text: &str) -> Result<EmbeddingVector, EmbeddingError> {
        Ok(self.embed_sync(text))
    }
}

/// Lowercase word tokens. `+ # . /` survive inside a token so "c++", "node.js"
/// and "ci/cd" stay whole; trailing sentence punctuation is dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '/')))
        .map(|t| t.trim_matches(|c: char| matches!(c, '.' | '/')))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
