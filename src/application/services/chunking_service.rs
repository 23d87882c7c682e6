use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{
    SplitterFactory, StructuredParser, StructuredParserError, TextSplitter,
};
use crate::domain::{
    ChunkPolicyTable, ChunkStrategy, Classification, ContentUnit, Document, DocumentError,
    DocumentType, META_CHUNK_INDEX, META_DOCUMENT_TYPE, META_PAGE, META_ROLE, META_TOTAL_CHUNKS,
    Metadata, ROLE_CHILD,
};

use super::RetryPolicy;

/// Picks a chunking strategy from the classification and assigns the
/// resulting child units to the document.
pub struct ChunkingService {
    policies: Arc<ChunkPolicyTable>,
    splitters: Arc<dyn SplitterFactory>,
    structured_parser: Arc<dyn StructuredParser>,
    retry_policy: RetryPolicy,
}

impl ChunkingService {
    pub fn new(
        policies: Arc<ChunkPolicyTable>,
        splitters: Arc<dyn SplitterFactory>,
        structured_parser: Arc<dyn StructuredParser>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            policies,
            splitters,
            structured_parser,
            retry_policy,
        }
    }

    pub fn strategy_for(&self, document_type: DocumentType) -> ChunkStrategy {
        self.policies.strategy_for(document_type)
    }

    #[tracing::instrument(
        skip(self, document, classification),
        fields(
            document_id = %document.id(),
            document_type = %classification.document_type,
        )
    )]
    pub async fn chunk<'d>(
        &self,
        document: &'d mut Document,
        classification: &Classification,
    ) -> Result<&'d [ContentUnit], ChunkingError> {
        let document_type = classification.document_type;
        let strategy = self.strategy_for(document_type);

        if let Some(params) = strategy.params().filter(|p| !p.is_valid()) {
            return Err(ChunkingError::InvalidParameters {
                document_type,
                size: params.size,
                overlap: params.overlap,
            });
        }

        let child_units = if document.content().is_empty() {
            Vec::new()
        } else {
            match self.splitters.splitter_for(strategy) {
                Some(splitter) => split_document(document, document_type, splitter.as_ref()),
                None => self.parse_structured(document, document_type).await?,
            }
        };

        tracing::info!(
            strategy = strategy.name(),
            chunk_count = child_units.len(),
            "Document chunked"
        );

        document.set_child_units(child_units)?;
        Ok(document.child_units())
    }

    async fn parse_structured(
        &self,
        document: &Document,
        document_type: DocumentType,
    ) -> Result<Vec<ContentUnit>, ChunkingError> {
        let parser = &self.structured_parser;
        let units = self
            .retry_policy
            .run("structured_parse", move || parser.parse(document))
            .await?;

        let total = units.len();
        Ok(units
            .into_iter()
            .enumerate()
            .map(|(index, unit)| {
                let (text, unit_metadata) = unit.into_parts();
                let mut metadata = document.metadata().clone();
                metadata.extend(unit_metadata);
                ContentUnit::new(text, child_metadata(metadata, index, total, document_type))
            })
            .collect())
    }
}

/// Splits the whole document content and tags every chunk with its position,
/// the page its new content starts on, and the parent's metadata.
pub fn split_document(
    document: &Document,
    document_type: DocumentType,
    splitter: &dyn TextSplitter,
) -> Vec<ContentUnit> {
    let spans = splitter.split(document.content());
    let page_offsets = document.page_offsets();
    let total = spans.len();

    spans
        .into_iter()
        .enumerate()
        .map(|(index, span)| {
            let mut metadata =
                child_metadata(document.metadata().clone(), index, total, document_type);
            if let Some(page) = page_at(&page_offsets, span.content_start()) {
                metadata.insert(META_PAGE.to_string(), Value::from(page));
            }
            ContentUnit::new(span.text, metadata)
        })
        .collect()
}

fn child_metadata(
    mut metadata: Metadata,
    index: usize,
    total: usize,
    document_type: DocumentType,
) -> Metadata {
    metadata.insert(META_CHUNK_INDEX.to_string(), Value::from(index));
    metadata.insert(META_TOTAL_CHUNKS.to_string(), Value::from(total));
    metadata.insert(META_ROLE.to_string(), Value::from(ROLE_CHILD));
    metadata.insert(
        META_DOCUMENT_TYPE.to_string(),
        Value::from(document_type.as_str()),
    );
    metadata
}

fn page_at(page_offsets: &[(usize, u32)], char_offset: usize) -> Option<u32> {
    page_offsets
        .iter()
        .take_while(|(start, _)| *start <= char_offset)
        .last()
        .map(|(_, page)| *page)
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("invalid chunk parameters for {document_type}: size {size}, overlap {overlap}")]
    InvalidParameters {
        document_type: DocumentType,
        size: usize,
        overlap: usize,
    },
    #[error("structured parser: {0}")]
    StructuredParser(#[from] StructuredParserError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}
