mod chunk_policy;
mod classification;
mod content_unit;
mod document;
mod document_type;
mod embedding;
mod pipeline_state;
mod route_sampler;
mod vector_filter;

pub use chunk_policy::{ChunkPolicyTable, ChunkStrategy, GENERAL_SPLIT, MANUAL_SPLIT, SplitParams};
pub use classification::Classification;
pub use content_unit::{
    ContentUnit, META_CHUNK_INDEX, META_CONTENT, META_DOC_ID, META_DOCUMENT_TYPE, META_FILE_NAME,
    META_PAGE, META_PAGES_COUNT, META_ROLE, META_SOURCE_TYPE, META_TOTAL_CHUNKS, Metadata,
    ROLE_CHILD, ROLE_PAGE,
};
pub use document::{Document, DocumentError, DocumentId, PAGE_SEPARATOR, PageText, SourceType};
pub use document_type::DocumentType;
pub use embedding::Embedding;
pub use pipeline_state::PipelineState;
pub use route_sampler::sample_for_routing;
pub use vector_filter::{FilterCondition, RangeBounds, VectorFilter};
