//! Document text extraction: turns uploaded résumé bytes into plain text.
//!
//! `AppState` holds an `Arc<dyn TextExtractor>`. Production uses `PdfTextExtractor`;
//! tests swap in a plain-text extractor so no PDF fixtures are needed.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document could not be parsed: {0}")]
    Unreadable(String),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the document's text with surrounding whitespace trimmed.
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// PDF text extraction via `pdf-extract`. Parsing is CPU-bound and runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let size = bytes.len();
        let joined = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await;

        let text = match joined {
            Ok(Ok(text)) => text,
            Ok(Err(msg)) => return Err(ExtractionError::Unreadable(msg)),
            // pdf-extract panics on some malformed inputs
            Err(e) if e.is_panic() => {
                return Err(ExtractionError::Unreadable(
                    "PDF parser aborted on malformed input".to_string(),
                ))
            }
            Err(e) => return Err(ExtractionError::Join(e)),
        };

        let text = text.trim().to_string();
        debug!(bytes = size, chars = text.chars().count(), "PDF text extracted");
        Ok(text)
    }
}

/// Returns the first `max_chars` characters of `text`, never splitting a UTF-8 sequence.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_to_char_count() {
        let text = "a".repeat(1500);
        assert_eq!(preview(&text, 1000).len(), 1000);
    }

    #[test]
    fn test_preview_short_text_is_unchanged() {
        assert_eq!(preview("short résumé", 1000), "short résumé");
    }

    #[test]
    fn test_preview_respects_multibyte_boundaries() {
        let text = "ééééé";
        assert_eq!(preview(text, 2), "éé");
    }

    #[test]
    fn test_preview_empty_text() {
        assert_eq!(preview("", 1000), "");
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_non_pdf_bytes() {
        let result = PdfTextExtractor
            .extract(Bytes::from_static(b"definitely not a pdf"))
            .await;
        assert!(matches!(result, Err(ExtractionError::Unreadable(_))));
    }
}
