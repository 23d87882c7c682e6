use std::fmt;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::content_unit::{
    META_DOC_ID, META_FILE_NAME, META_PAGES_COUNT, META_SOURCE_TYPE, Metadata,
};
use super::ContentUnit;

pub const PAGE_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Combines the file name with a freshly generated token.
    pub fn generate(file_name: &str) -> Self {
        Self(format!("{}_{}", file_name, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Pdf,
}

impl SourceType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }
}

/// Page text handed over by an extractor, numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("child units already assigned for document {0}")]
    ChildUnitsAlreadyAssigned(DocumentId),
}

/// One ingested file: page units in physical order plus the chunks derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    content: String,
    metadata: Metadata,
    units: Vec<ContentUnit>,
    child_units: Option<Vec<ContentUnit>>,
}

impl Document {
    /// Builds a document from already-normalized page texts. Pages whose text
    /// is empty are skipped but keep their original page numbers on the rest.
    pub fn from_pages(file_name: &str, source_type: SourceType, pages: Vec<PageText>) -> Self {
        let id = DocumentId::generate(file_name);
        let pages_count = pages.len();

        let mut metadata = Metadata::new();
        metadata.insert(META_DOC_ID.to_string(), Value::from(id.as_str()));
        metadata.insert(META_FILE_NAME.to_string(), Value::from(file_name));
        metadata.insert(
            META_SOURCE_TYPE.to_string(),
            Value::from(source_type.as_str()),
        );
        metadata.insert(META_PAGES_COUNT.to_string(), Value::from(pages_count));

        let units: Vec<ContentUnit> = pages
            .into_iter()
            .filter(|p| !p.text.trim().is_empty())
            .map(|p| ContentUnit::page(p.text, p.page_number, &metadata))
            .collect();

        let content = units
            .iter()
            .map(ContentUnit::text)
            .collect::<Vec<_>>()
            .join(PAGE_SEPARATOR);

        Self {
            id,
            content,
            metadata,
            units,
            child_units: None,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn file_name(&self) -> &str {
        self.metadata
            .get(META_FILE_NAME)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn pages_count(&self) -> usize {
        self.metadata
            .get(META_PAGES_COUNT)
            .and_then(Value::as_u64)
            .unwrap_or_default() as usize
    }

    pub fn units(&self) -> &[ContentUnit] {
        &self.units
    }

    /// Empty until chunking has run.
    pub fn child_units(&self) -> &[ContentUnit] {
        self.child_units.as_deref().unwrap_or_default()
    }

    pub fn is_chunked(&self) -> bool {
        self.child_units.is_some()
    }

    pub fn set_child_units(&mut self, child_units: Vec<ContentUnit>) -> Result<(), DocumentError> {
        if self.child_units.is_some() {
            return Err(DocumentError::ChildUnitsAlreadyAssigned(self.id.clone()));
        }
        self.child_units = Some(child_units);
        Ok(())
    }

    /// Character offset of every page unit inside `content`, paired with its page number.
    pub fn page_offsets(&self) -> Vec<(usize, u32)> {
        let separator_len = PAGE_SEPARATOR.chars().count();
        let mut offsets = Vec::with_capacity(self.units.len());
        let mut cursor = 0;

        for unit in &self.units {
            offsets.push((cursor, unit.page_number().unwrap_or_default()));
            cursor += unit.text().chars().count() + separator_len;
        }

        offsets
    }
}
