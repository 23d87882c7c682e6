use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::application::ports::{
    CollectionConfig, SearchResult, VectorPoint, VectorStore, VectorStoreError,
};
use crate::domain::{Embedding, VectorFilter};

struct Collection {
    dimensions: usize,
    /// Keyed by point id, in first-insertion order.
    points: IndexMap<String, VectorPoint>,
}

/// Process-local vector store ranking by cosine similarity. Used in tests
/// and when no Qdrant URL is configured.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn point_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, |c| c.points.len())
    }

    pub async fn points(&self, collection: &str) -> Vec<VectorPoint> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|c| c.points.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(
        &self,
        collection: &str,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        let mut collections = self.collections.write().await;
        let dimensions = config.vector_dimensions as usize;

        match collections.get(collection) {
            Some(existing) if existing.dimensions != dimensions => {
                Err(VectorStoreError::DimensionMismatch {
                    expected: dimensions,
                    actual: existing.dimensions,
                })
            }
            Some(_) => Ok(false),
            None => {
                collections.insert(
                    collection.to_string(),
                    Collection {
                        dimensions,
                        points: IndexMap::new(),
                    },
                );
                tracing::debug!(collection = %collection, dimensions, "collection_created");
                Ok(true)
            }
        }
    }

    async fn upsert(&self, collection: &str, points: &[VectorPoint]) -> Result<(), VectorStoreError> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| VectorStoreError::CollectionNotFound(collection.to_string()))?;

        if let Some(bad) = points
            .iter()
            .find(|p| p.vector.dimensions() != target.dimensions)
        {
            return Err(VectorStoreError::DimensionMismatch {
                expected: target.dimensions,
                actual: bad.vector.dimensions(),
            });
        }

        for point in points {
            target.points.insert(point.id.clone(), point.clone());
        }

        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        vector: &Embedding,
        filters: &[VectorFilter],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let collections = self.collections.read().await;
        let source = collections
            .get(collection)
            .ok_or_else(|| VectorStoreError::CollectionNotFound(collection.to_string()))?;

        let mut results: Vec<SearchResult> = source
            .points
            .values()
            .filter(|p| filters.iter().all(|f| f.evaluate(&p.payload)))
            .map(|p| SearchResult {
                id: p.id.clone(),
                payload: p.payload.clone(),
                score: vector.cosine_similarity(&p.vector),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        Ok(results)
    }

    async fn delete_collection(&self, collection: &str) -> Result<(), VectorStoreError> {
        self.collections.write().await.remove(collection);
        Ok(())
    }
}
