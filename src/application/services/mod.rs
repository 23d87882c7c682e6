mod chunking_service;
mod document_classifier;
mod ingestion_pipeline;
mod json_reply;
mod prompt_catalog;
mod retrieval_service;
mod retry_policy;

pub use chunking_service::{ChunkingError, ChunkingService, split_document};
pub use document_classifier::{ClassificationError, DocumentClassifier, parse_classification};
pub use ingestion_pipeline::{
    DEFAULT_EMBED_BATCH_SIZE, FailureCategory, IngestionPipeline, IngestionReport, PipelineError,
    PipelineErrorKind,
};
pub use prompt_catalog::PromptCatalog;
pub use retrieval_service::{
    Answer, Citation, Claim, NO_INFORMATION_ANSWER, RetrievalError, RetrievalService,
    RetrievedPassage, parse_answer,
};
pub use retry_policy::{
    DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_BACKOFF_FACTOR, DEFAULT_INITIAL_DELAY, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_DELAY, Jitter, RetryPolicy,
};
