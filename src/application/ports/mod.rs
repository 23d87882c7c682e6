mod collection_config;
mod distance_metric;
mod embedder;
mod file_loader;
mod llm_client;
mod payload_field_type;
mod payload_index;
mod retryable;
mod search_result;
mod structured_parser;
mod text_splitter;
mod vector_store;
mod vector_store_error;

pub use collection_config::CollectionConfig;
pub use distance_metric::DistanceMetric;
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use llm_client::{LlmClient, LlmClientError, ResponseFormat};
pub use payload_field_type::PayloadFieldType;
pub use payload_index::PayloadIndex;
pub use retryable::{Retryable, TransportError};
pub use search_result::SearchResult;
pub use structured_parser::{StructuredParser, StructuredParserError};
pub use text_splitter::{SplitterFactory, TextSpan, TextSplitter};
pub use vector_store::{VectorPoint, VectorStore};
pub use vector_store_error::VectorStoreError;
