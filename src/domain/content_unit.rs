use serde::Serialize;
use serde_json::{Map, Value};

pub type Metadata = Map<String, Value>;

pub const META_PAGE: &str = "page";
pub const META_FILE_NAME: &str = "file_name";
pub const META_SOURCE_TYPE: &str = "source_type";
pub const META_DOC_ID: &str = "doc_id";
pub const META_PAGES_COUNT: &str = "pages_count";
pub const META_ROLE: &str = "role";
pub const META_CHUNK_INDEX: &str = "chunk_index";
pub const META_TOTAL_CHUNKS: &str = "total_chunks";
pub const META_DOCUMENT_TYPE: &str = "document_type";
pub const META_CONTENT: &str = "content";

pub const ROLE_PAGE: &str = "page";
pub const ROLE_CHILD: &str = "child";

/// Smallest addressable piece of source text: a physical page or a derived chunk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentUnit {
    text: String,
    metadata: Metadata,
}

impl ContentUnit {
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn page(text: impl Into<String>, page: u32, document_metadata: &Metadata) -> Self {
        let mut metadata = Metadata::new();
        metadata.insert(META_PAGE.to_string(), Value::from(page));
        for key in [META_FILE_NAME, META_SOURCE_TYPE] {
            if let Some(value) = document_metadata.get(key) {
                metadata.insert(key.to_string(), value.clone());
            }
        }
        metadata.insert(META_ROLE.to_string(), Value::from(ROLE_PAGE));
        Self::new(text, metadata)
    }

    pub fn with_metadata(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn page_number(&self) -> Option<u32> {
        self.metadata
            .get(META_PAGE)
            .and_then(Value::as_u64)
            .and_then(|p| u32::try_from(p).ok())
    }

    pub fn chunk_index(&self) -> Option<usize> {
        self.metadata
            .get(META_CHUNK_INDEX)
            .and_then(Value::as_u64)
            .map(|i| i as usize)
    }

    pub fn total_chunks(&self) -> Option<usize> {
        self.metadata
            .get(META_TOTAL_CHUNKS)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    pub fn role(&self) -> Option<&str> {
        self.metadata.get(META_ROLE).and_then(Value::as_str)
    }

    pub fn into_parts(self) -> (String, Metadata) {
        (self.text, self.metadata)
    }
}
