use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, PageText, SourceType};

use super::text_normalizer::normalize_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> Result<Vec<PageText>, FileLoaderError> {
        let doc = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::MalformedInput(format!("failed to parse PDF: {e}")))?;

        let page_count = doc.page_count().map_err(|e| {
            FileLoaderError::MalformedInput(format!("failed to read page count: {e}"))
        })?;

        let mut pages = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let raw = match doc.extract_text(page_index) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Page text extraction failed");
                    String::new()
                }
            };
            pages.push(PageText::new((page_index + 1) as u32, normalize_text(&raw)));
        }

        Ok(pages)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, data), fields(file_name = %file_name, bytes = data.len()))]
    async fn extract(&self, data: &[u8], file_name: &str) -> Result<Document, FileLoaderError> {
        if data.is_empty() {
            return Err(FileLoaderError::EmptyInput(file_name.to_string()));
        }

        if !data.starts_with(PDF_MAGIC) {
            return Err(FileLoaderError::MalformedInput(format!(
                "{file_name} is not a PDF file"
            )));
        }

        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let document = Document::from_pages(file_name, SourceType::Pdf, pages);
        tracing::info!(
            document_id = %document.id(),
            pages_count = document.pages_count(),
            text_pages = document.units().len(),
            "PDF text extraction complete"
        );

        if document.units().is_empty() {
            return Err(FileLoaderError::NoTextFound(file_name.to_string()));
        }

        Ok(document)
    }
}
