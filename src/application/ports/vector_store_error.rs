use super::{Retryable, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum VectorStoreError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("collection creation failed: {0}")]
    CollectionCreationFailed(String),
    #[error("collection deletion failed: {0}")]
    CollectionDeletionFailed(String),
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
    #[error("payload index creation failed: {0}")]
    PayloadIndexFailed(String),
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("upsert failed: {0}")]
    UpsertFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
    #[error("vector store request timed out after {0:?}")]
    Timeout(std::time::Duration),
}

impl Retryable for VectorStoreError {
    fn is_retryable(&self) -> bool {
        !matches!(
            self,
            VectorStoreError::CollectionNotFound(_) | VectorStoreError::DimensionMismatch { .. }
        )
    }
}

impl TransportError for VectorStoreError {
    fn timed_out(after: std::time::Duration) -> Self {
        VectorStoreError::Timeout(after)
    }
}
