use async_trait::async_trait;

use super::{CollectionConfig, SearchResult, VectorStoreError};
use crate::domain::{Embedding, Metadata, VectorFilter};

#[derive(Debug, Clone)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Embedding,
    pub payload: Metadata,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Creates the collection if missing. Returns whether it was created.
    async fn ensure_collection(
        &self,
        collection: &str,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError>;

    async fn upsert(&self, collection: &str, points: &[VectorPoint])
    -> Result<(), VectorStoreError>;

    async fn query(
        &self,
        collection: &str,
        vector: &Embedding,
        filters: &[VectorFilter],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError>;

    async fn delete_collection(&self, collection: &str) -> Result<(), VectorStoreError>;
}
