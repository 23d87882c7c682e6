use docroute::application::ports::{FileLoader, FileLoaderError};
use docroute::infrastructure::text_processing::PdfAdapter;

#[tokio::test]
async fn given_empty_bytes_when_extracting_then_reports_empty_input() {
    let adapter = PdfAdapter::new();

    let result = adapter.extract(&[], "empty.pdf").await;

    assert!(matches!(result, Err(FileLoaderError::EmptyInput(_))));
}

#[tokio::test]
async fn given_bytes_without_pdf_header_when_extracting_then_reports_malformed_input() {
    let adapter = PdfAdapter::new();

    let result = adapter.extract(b"plain text, not a pdf", "notes.pdf").await;

    let error = result.unwrap_err();
    assert!(matches!(error, FileLoaderError::MalformedInput(_)));
    assert!(error.is_malformed_input());
}
