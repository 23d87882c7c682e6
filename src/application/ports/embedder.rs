use async_trait::async_trait;

use crate::domain::Embedding;

use super::{Retryable, TransportError};

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EmbedderError {
    #[error("embedding api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("embedding request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("embedding rate limited")]
    RateLimited,
    #[error("embedding request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),
}

impl EmbedderError {
    /// Maps a non-success HTTP status. Client errors other than 408 and 429
    /// will fail the same way on every attempt.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => EmbedderError::RateLimited,
            408 => EmbedderError::ApiRequestFailed(format!("HTTP {status}: {body}")),
            400..=499 => EmbedderError::Rejected { status, body },
            _ => EmbedderError::ApiRequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

impl Retryable for EmbedderError {
    fn is_retryable(&self) -> bool {
        !matches!(self, EmbedderError::InvalidResponse(_) | EmbedderError::Rejected { .. })
    }
}

impl TransportError for EmbedderError {
    fn timed_out(after: std::time::Duration) -> Self {
        EmbedderError::Timeout(after)
    }
}
