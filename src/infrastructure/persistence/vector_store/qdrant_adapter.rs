use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder, Distance, FieldType,
    Filter, PointId, PointStruct, Range, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder, VectorsConfig,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::application::ports::{
    CollectionConfig, DistanceMetric, PayloadFieldType, SearchResult, VectorPoint, VectorStore,
    VectorStoreError,
};
use crate::domain::{Embedding, FilterCondition, RangeBounds, VectorFilter};

pub struct QdrantAdapter {
    client: Arc<Qdrant>,
}

impl QdrantAdapter {
    pub fn new(url: &str, api_key: Option<String>) -> Result<Self, VectorStoreError> {
        let mut builder = Qdrant::from_url(url);
        if let Some(key) = api_key.filter(|k| !k.is_empty()) {
            builder = builder.api_key(key);
        }

        let client = builder
            .build()
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    fn map_distance_metric(metric: &DistanceMetric) -> Distance {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclidean => Distance::Euclid,
            DistanceMetric::DotProduct => Distance::Dot,
        }
    }

    fn map_field_type(field_type: &PayloadFieldType) -> FieldType {
        match field_type {
            PayloadFieldType::Keyword => FieldType::Keyword,
            PayloadFieldType::Integer => FieldType::Integer,
            PayloadFieldType::Float => FieldType::Float,
            PayloadFieldType::Text => FieldType::Text,
        }
    }

    /// Translates payload predicates into a single `must` filter.
    pub fn build_filter(filters: &[VectorFilter]) -> Option<Filter> {
        if filters.is_empty() {
            return None;
        }

        let conditions: Vec<Condition> = filters
            .iter()
            .map(|filter| match &filter.condition {
                FilterCondition::Match(value) => Self::match_condition(&filter.key, value),
                FilterCondition::Range(bounds) => Self::range_condition(&filter.key, bounds),
            })
            .collect();

        Some(Filter::must(conditions))
    }

    fn match_condition(key: &str, value: &Value) -> Condition {
        match value {
            Value::Bool(b) => Condition::matches(key, *b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Condition::matches(key, i),
                None => {
                    let f = n.as_f64().unwrap_or_default();
                    Self::range_condition(
                        key,
                        &RangeBounds {
                            gte: Some(f),
                            lte: Some(f),
                            ..RangeBounds::default()
                        },
                    )
                }
            },
            Value::String(s) => Condition::matches(key, s.clone()),
            other => Condition::matches(key, other.to_string()),
        }
    }

    fn range_condition(key: &str, bounds: &RangeBounds) -> Condition {
        Condition::range(
            key,
            Range {
                gte: bounds.gte,
                lte: bounds.lte,
                gt: bounds.gt,
                lt: bounds.lt,
            },
        )
    }

    async fn collection_exists(&self, collection: &str) -> Result<bool, VectorStoreError> {
        self.client
            .collection_exists(collection)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))
    }

    async fn collection_vector_size(&self, collection: &str) -> Result<Option<u64>, VectorStoreError> {
        let collection_info = self
            .client
            .collection_info(collection)
            .await
            .map_err(|e| VectorStoreError::ConnectionFailed(e.to_string()))?;

        let vector_size = collection_info
            .result
            .and_then(|result| result.config)
            .and_then(|config| config.params)
            .and_then(|params| params.vectors_config)
            .and_then(|vectors_config| match vectors_config.config {
                Some(qdrant_client::qdrant::vectors_config::Config::Params(params)) => {
                    Some(params.size)
                }
                _ => None,
            });

        Ok(vector_size)
    }
}

#[async_trait]
impl VectorStore for QdrantAdapter {
    #[instrument(skip(self, config), fields(collection = %collection))]
    async fn ensure_collection(
        &self,
        collection: &str,
        config: &CollectionConfig,
    ) -> Result<bool, VectorStoreError> {
        if self.collection_exists(collection).await? {
            let existing_size = self.collection_vector_size(collection).await?;
            if let Some(size) = existing_size.filter(|s| *s != config.vector_dimensions) {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: config.vector_dimensions as usize,
                    actual: size as usize,
                });
            }
            return Ok(false);
        }

        let vectors_config = VectorsConfig::from(VectorParamsBuilder::new(
            config.vector_dimensions,
            Self::map_distance_metric(&config.distance_metric),
        ));

        self.client
            .create_collection(
                CreateCollectionBuilder::new(collection).vectors_config(vectors_config),
            )
            .await
            .map_err(|e| VectorStoreError::CollectionCreationFailed(e.to_string()))?;

        info!(collection = %collection, "collection_created");

        for index in &config.payload_indexes {
            self.client
                .create_field_index(CreateFieldIndexCollectionBuilder::new(
                    collection,
                    &index.field_name,
                    Self::map_field_type(&index.field_type),
                ))
                .await
                .map_err(|e| VectorStoreError::PayloadIndexFailed(e.to_string()))?;

            info!(collection = %collection, field = %index.field_name, "payload_index_applied");
        }

        Ok(true)
    }

    #[instrument(skip(self, points), fields(collection = %collection, count = points.len()))]
    async fn upsert(&self, collection: &str, points: &[VectorPoint]) -> Result<(), VectorStoreError> {
        let qdrant_points: Vec<PointStruct> = points
            .iter()
            .map(|point| {
                let payload: HashMap<String, Value> = point
                    .payload
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                PointStruct::new(
                    PointId::from(point.id.clone()),
                    point.vector.values.clone(),
                    payload,
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, qdrant_points).wait(true))
            .await
            .map_err(|e| VectorStoreError::UpsertFailed(e.to_string()))?;

        info!(collection = %collection, count = points.len(), "points_upserted");
        Ok(())
    }

    #[instrument(skip(self, vector, filters), fields(collection = %collection, top_k = top_k, filters = filters.len()))]
    async fn query(
        &self,
        collection: &str,
        vector: &Embedding,
        filters: &[VectorFilter],
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        if !self.collection_exists(collection).await? {
            return Err(VectorStoreError::CollectionNotFound(collection.to_string()));
        }

        let mut request =
            SearchPointsBuilder::new(collection, vector.values.clone(), top_k as u64)
                .with_payload(true);
        if let Some(filter) = Self::build_filter(filters) {
            request = request.filter(filter);
        }

        let response = self
            .client
            .search_points(request)
            .await
            .map_err(|e| VectorStoreError::SearchFailed(e.to_string()))?;

        let results = response
            .result
            .into_iter()
            .map(|point| {
                let id = match point.id.and_then(|id| id.point_id_options) {
                    Some(PointIdOptions::Uuid(uuid)) => uuid,
                    Some(PointIdOptions::Num(num)) => num.to_string(),
                    None => String::new(),
                };
                let payload = point
                    .payload
                    .into_iter()
                    .map(|(k, v)| (k, v.into_json()))
                    .collect();

                SearchResult {
                    id,
                    payload,
                    score: point.score,
                }
            })
            .collect();

        Ok(results)
    }

    #[instrument(skip(self), fields(collection = %collection))]
    async fn delete_collection(&self, collection: &str) -> Result<(), VectorStoreError> {
        if !self.collection_exists(collection).await? {
            return Ok(());
        }

        self.client
            .delete_collection(collection)
            .await
            .map_err(|e| VectorStoreError::CollectionDeletionFailed(e.to_string()))?;

        info!(collection = %collection, "collection_deleted");
        Ok(())
    }
}
