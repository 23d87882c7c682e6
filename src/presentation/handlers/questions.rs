use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error_response::ErrorResponse;

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_question_handler(
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> Response {
    let question = request.question.trim();
    if question.is_empty() {
        return ErrorResponse::new("Question must not be empty")
            .into_response_with(StatusCode::BAD_REQUEST);
    }

    tracing::debug!(question = %sanitize_prompt(question), "Processing question");

    match state.retrieval_service.ask(question).await {
        Ok(answer) => {
            tracing::info!(claims = answer.claims.len(), "Question answered");
            (StatusCode::OK, Json(answer)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Question failed");
            ErrorResponse {
                error: format!("Question failed: {}", e),
                category: Some("transport_failure"),
                last_completed_state: None,
            }
            .into_response_with(StatusCode::BAD_GATEWAY)
        }
    }
}
