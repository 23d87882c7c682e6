use std::sync::Arc;

use crate::application::services::{IngestionPipeline, RetrievalService};

#[derive(Clone)]
pub struct AppState {
    pub ingestion_pipeline: Arc<IngestionPipeline>,
    pub retrieval_service: Arc<RetrievalService>,
    pub max_upload_bytes: usize,
}
