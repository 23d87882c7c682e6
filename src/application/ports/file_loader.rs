use async_trait::async_trait;

use crate::domain::Document;

/// Extraction collaborator: turns raw bytes into a [`Document`] with one
/// normalized unit per physical page.
#[async_trait]
pub trait FileLoader: Send + Sync {
    async fn extract(&self, data: &[u8], file_name: &str) -> Result<Document, FileLoaderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FileLoaderError {
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}

impl FileLoaderError {
    /// Whether the caller sent bytes that can never be extracted.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, FileLoaderError::ExtractionFailed(_))
    }
}
