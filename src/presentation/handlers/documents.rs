use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{FailureCategory, IngestionReport, PipelineError, PipelineErrorKind};
use crate::domain::{Classification, ContentUnit, SourceType};
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;

#[derive(Serialize)]
pub struct DocumentResponse {
    pub document_id: String,
    pub file_name: String,
    pub pages_count: usize,
    pub classification: Classification,
    pub strategy: &'static str,
    pub state: &'static str,
    pub indexed_points: usize,
    pub child_units: Vec<ContentUnit>,
}

impl From<IngestionReport> for DocumentResponse {
    fn from(report: IngestionReport) -> Self {
        let IngestionReport {
            document,
            classification,
            strategy,
            state,
            indexed_points,
        } = report;

        Self {
            document_id: document.id().to_string(),
            file_name: document.file_name().to_string(),
            pages_count: document.pages_count(),
            classification,
            strategy: strategy.name(),
            state: state.as_str(),
            indexed_points,
            child_units: document.child_units().to_vec(),
        }
    }
}

fn is_pdf_upload(content_type: Option<&str>, file_name: &str) -> bool {
    match content_type {
        Some(mime) if mime != "application/octet-stream" => SourceType::from_mime(mime).is_some(),
        _ => file_name.to_lowercase().ends_with(".pdf"),
    }
}

fn pipeline_error_response(error: &PipelineError) -> Response {
    let status = match (&error.kind, error.category()) {
        (PipelineErrorKind::EmptyInput, _) => StatusCode::BAD_REQUEST,
        (_, FailureCategory::MalformedInput) => StatusCode::UNPROCESSABLE_ENTITY,
        (_, FailureCategory::TransportFailure) => StatusCode::BAD_GATEWAY,
        (_, FailureCategory::Internal) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    ErrorResponse {
        error: error.to_string(),
        category: Some(error.category().as_str()),
        last_completed_state: Some(error.last_completed.as_str()),
    }
    .into_response_with(status)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_document_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Upload request with no file");
            return ErrorResponse::new("No file uploaded").into_response_with(StatusCode::BAD_REQUEST);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return ErrorResponse::new(format!("Failed to read multipart: {}", e))
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
    let content_type = field.content_type().map(str::to_string);

    tracing::debug!(file_name = %file_name, content_type = ?content_type, "Processing file upload");

    if !is_pdf_upload(content_type.as_deref(), &file_name) {
        tracing::warn!(content_type = ?content_type, "Unsupported content type");
        return ErrorResponse::new(format!(
            "Unsupported content type: {}",
            content_type.as_deref().unwrap_or("unknown")
        ))
        .into_response_with(StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return ErrorResponse::new(format!("Failed to read file: {}", e))
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    if data.is_empty() {
        return ErrorResponse::new("Uploaded file is empty").into_response_with(StatusCode::BAD_REQUEST);
    }

    tracing::debug!(bytes = data.len(), "File data received");

    match state.ingestion_pipeline.ingest(&data, &file_name).await {
        Ok(report) => {
            tracing::info!(
                document_id = %report.document.id(),
                document_type = %report.classification.document_type,
                chunk_count = report.document.child_units().len(),
                "Document ingested"
            );
            (StatusCode::CREATED, Json(DocumentResponse::from(report))).into_response()
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                category = %e.category(),
                last_completed = %e.last_completed,
                "Document ingestion failed"
            );
            pipeline_error_response(&e)
        }
    }
}
