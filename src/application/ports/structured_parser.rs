use async_trait::async_trait;

use crate::domain::{ContentUnit, Document};

use super::{Retryable, TransportError};

/// Parser that receives documents routed to the pass-through strategy and
/// decides their retrievable units on its own.
#[async_trait]
pub trait StructuredParser: Send + Sync {
    async fn parse(&self, document: &Document) -> Result<Vec<ContentUnit>, StructuredParserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StructuredParserError {
    #[error("structured parser request failed: {0}")]
    RequestFailed(String),
    #[error("structured parser timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("structured parser rejected document: {0}")]
    Rejected(String),
}

impl Retryable for StructuredParserError {
    fn is_retryable(&self) -> bool {
        !matches!(self, StructuredParserError::Rejected(_))
    }
}

impl TransportError for StructuredParserError {
    fn timed_out(after: std::time::Duration) -> Self {
        StructuredParserError::Timeout(after)
    }
}
