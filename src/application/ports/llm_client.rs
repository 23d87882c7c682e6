use async_trait::async_trait;

use super::{Retryable, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// Ask the provider to constrain output to a JSON object.
    Json,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("request rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmClientError {
    /// Maps a non-success HTTP status. Client errors other than 408 and 429
    /// will fail the same way on every attempt.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => LlmClientError::RateLimited,
            408 => LlmClientError::ApiRequestFailed(format!("HTTP {status}: {body}")),
            400..=499 => LlmClientError::Rejected { status, body },
            _ => LlmClientError::ApiRequestFailed(format!("HTTP {status}: {body}")),
        }
    }
}

impl Retryable for LlmClientError {
    fn is_retryable(&self) -> bool {
        !matches!(self, LlmClientError::InvalidResponse(_) | LlmClientError::Rejected { .. })
    }
}

impl TransportError for LlmClientError {
    fn timed_out(after: std::time::Duration) -> Self {
        LlmClientError::Timeout(after)
    }
}
