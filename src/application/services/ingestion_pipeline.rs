use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::application::ports::{
    CollectionConfig, Embedder, EmbedderError, FileLoader, FileLoaderError, VectorPoint,
    VectorStore, VectorStoreError,
};
use crate::domain::{
    ChunkStrategy, Classification, Document, Embedding, META_CONTENT, PipelineState,
    sample_for_routing,
};

use super::{ChunkingError, ChunkingService, ClassificationError, DocumentClassifier, RetryPolicy};

pub const DEFAULT_EMBED_BATCH_SIZE: usize = 64;

/// Runs one uploaded file through extraction, routing, chunking, embedding
/// and indexing. Nothing is written to the index unless every earlier step
/// succeeded for the whole document.
pub struct IngestionPipeline {
    file_loader: Arc<dyn FileLoader>,
    classifier: Arc<DocumentClassifier>,
    chunking: Arc<ChunkingService>,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    collection: String,
    collection_config: CollectionConfig,
    retry_policy: RetryPolicy,
    embed_batch_size: usize,
}

/// Outcome of a pipeline run that reached INDEXED.
#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub document: Document,
    pub classification: Classification,
    pub strategy: ChunkStrategy,
    pub state: PipelineState,
    pub indexed_points: usize,
}

impl IngestionPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        classifier: Arc<DocumentClassifier>,
        chunking: Arc<ChunkingService>,
        embedder: Arc<dyn Embedder>,
        vector_store: Arc<dyn VectorStore>,
        collection: impl Into<String>,
        collection_config: CollectionConfig,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            file_loader,
            classifier,
            chunking,
            embedder,
            vector_store,
            collection: collection.into(),
            collection_config,
            retry_policy,
            embed_batch_size: DEFAULT_EMBED_BATCH_SIZE,
        }
    }

    pub fn with_embed_batch_size(mut self, batch_size: usize) -> Self {
        self.embed_batch_size = batch_size.max(1);
        self
    }

    #[tracing::instrument(skip(self, data), fields(file_name = %file_name, bytes = data.len()))]
    pub async fn ingest(&self, data: &[u8], file_name: &str) -> Result<IngestionReport, PipelineError> {
        let mut tracker = StateTracker::new();

        if data.is_empty() {
            return Err(tracker.fail(PipelineErrorKind::EmptyInput));
        }

        let mut document = self
            .file_loader
            .extract(data, file_name)
            .await
            .map_err(|e| tracker.fail(e.into()))?;
        tracker.advance(PipelineState::Extracted);

        let sample = sample_for_routing(document.units());
        tracker.advance(PipelineState::Sampled);

        let classification = self
            .classifier
            .classify(&sample)
            .await
            .map_err(|e| tracker.fail(e.into()))?;
        tracker.advance(PipelineState::Classified);

        let strategy = self.chunking.strategy_for(classification.document_type);
        self.chunking
            .chunk(&mut document, &classification)
            .await
            .map_err(|e| tracker.fail(e.into()))?;
        tracker.advance(PipelineState::Chunked);

        let embeddings = self
            .embed_children(&document)
            .await
            .map_err(|kind| tracker.fail(kind))?;
        tracker.advance(PipelineState::Embedded);

        let indexed_points = self
            .index(&document, embeddings)
            .await
            .map_err(|kind| tracker.fail(kind))?;
        tracker.advance(PipelineState::Indexed);

        tracing::info!(
            document_id = %document.id(),
            document_type = %classification.document_type,
            strategy = strategy.name(),
            chunk_count = document.child_units().len(),
            "Ingestion completed"
        );

        Ok(IngestionReport {
            document,
            classification,
            strategy,
            state: tracker.current,
            indexed_points,
        })
    }

    async fn embed_children(&self, document: &Document) -> Result<Vec<Embedding>, PipelineErrorKind> {
        let texts: Vec<&str> = document.child_units().iter().map(|u| u.text()).collect();
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embedder = &self.embedder;
        let mut embeddings = Vec::with_capacity(texts.len());

        for (batch_index, batch) in texts.chunks(self.embed_batch_size).enumerate() {
            tracing::debug!(batch_index, batch_len = batch.len(), "Embedding chunk batch");
            let vectors = self
                .retry_policy
                .run("embed_chunks", move || embedder.embed_batch(batch))
                .await?;

            if vectors.len() != batch.len() {
                return Err(PipelineErrorKind::EmbeddingCountMismatch {
                    expected: batch.len(),
                    actual: vectors.len(),
                });
            }
            embeddings.extend(vectors);
        }

        let expected = self.collection_config.vector_dimensions as usize;
        if let Some(bad) = embeddings.iter().find(|e| e.dimensions() != expected) {
            return Err(PipelineErrorKind::DimensionMismatch {
                expected,
                actual: bad.dimensions(),
            });
        }

        Ok(embeddings)
    }

    async fn index(
        &self,
        document: &Document,
        embeddings: Vec<Embedding>,
    ) -> Result<usize, PipelineErrorKind> {
        if embeddings.is_empty() {
            tracing::debug!("No chunks to index");
            return Ok(0);
        }

        let points: Vec<VectorPoint> = document
            .child_units()
            .iter()
            .zip(embeddings)
            .map(|(unit, vector)| {
                let mut payload = unit.metadata().clone();
                payload.insert(META_CONTENT.to_string(), Value::from(unit.text()));
                VectorPoint {
                    id: Uuid::new_v4().to_string(),
                    vector,
                    payload,
                }
            })
            .collect();

        let store = &self.vector_store;
        let collection = self.collection.as_str();
        let config = &self.collection_config;
        let batch = points.as_slice();

        self.retry_policy
            .run("ensure_collection", move || {
                store.ensure_collection(collection, config)
            })
            .await?;

        self.retry_policy
            .run("upsert_chunks", move || store.upsert(collection, batch))
            .await?;

        Ok(points.len())
    }
}

struct StateTracker {
    current: PipelineState,
}

impl StateTracker {
    fn new() -> Self {
        tracing::debug!(state = %PipelineState::Received, "Pipeline state transition");
        Self {
            current: PipelineState::Received,
        }
    }

    fn advance(&mut self, next: PipelineState) {
        debug_assert_eq!(self.current.next(), Some(next));
        tracing::debug!(state = %next, "Pipeline state transition");
        self.current = next;
    }

    fn fail(&self, kind: PipelineErrorKind) -> PipelineError {
        tracing::error!(
            state = %PipelineState::Errored,
            last_completed = %self.current,
            error = %kind,
            "Pipeline failed"
        );
        PipelineError {
            last_completed: self.current,
            kind,
        }
    }
}

/// Failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    MalformedInput,
    TransportFailure,
    Internal,
}

impl FailureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureCategory::MalformedInput => "malformed_input",
            FailureCategory::TransportFailure => "transport_failure",
            FailureCategory::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("ingestion failed after {last_completed}: {kind}")]
pub struct PipelineError {
    /// Last state the run completed before moving to ERRORED.
    pub last_completed: PipelineState,
    #[source]
    pub kind: PipelineErrorKind,
}

impl PipelineError {
    pub fn category(&self) -> FailureCategory {
        self.kind.category()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineErrorKind {
    #[error("empty input")]
    EmptyInput,
    #[error("extraction: {0}")]
    Extraction(#[from] FileLoaderError),
    #[error("classification: {0}")]
    Classification(#[from] ClassificationError),
    #[error("chunking: {0}")]
    Chunking(#[from] ChunkingError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("embedder returned {actual} vectors for {expected} chunks")]
    EmbeddingCountMismatch { expected: usize, actual: usize },
    #[error("embedding has {actual} dimensions, collection expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("indexing: {0}")]
    Indexing(#[from] VectorStoreError),
}

impl PipelineErrorKind {
    pub fn category(&self) -> FailureCategory {
        match self {
            PipelineErrorKind::EmptyInput => FailureCategory::MalformedInput,
            PipelineErrorKind::Extraction(e) if e.is_malformed_input() => {
                FailureCategory::MalformedInput
            }
            PipelineErrorKind::Extraction(_) => FailureCategory::Internal,
            PipelineErrorKind::Classification(_) | PipelineErrorKind::Embedding(_) => {
                FailureCategory::TransportFailure
            }
            PipelineErrorKind::Chunking(ChunkingError::StructuredParser(_)) => {
                FailureCategory::TransportFailure
            }
            PipelineErrorKind::Chunking(_) => FailureCategory::Internal,
            PipelineErrorKind::Indexing(
                VectorStoreError::DimensionMismatch { .. } | VectorStoreError::CollectionNotFound(_),
            ) => FailureCategory::Internal,
            PipelineErrorKind::Indexing(_) => FailureCategory::TransportFailure,
            PipelineErrorKind::EmbeddingCountMismatch { .. }
            | PipelineErrorKind::DimensionMismatch { .. } => FailureCategory::Internal,
        }
    }
}
