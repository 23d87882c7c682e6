mod documents;
mod error_response;
mod health;
mod questions;

pub use documents::{DocumentResponse, upload_document_handler};
pub use error_response::ErrorResponse;
pub use health::health_handler;
pub use questions::{QuestionRequest, ask_question_handler};
