use std::sync::Arc;

use serde_json::Value;

use crate::application::ports::{LlmClient, LlmClientError, ResponseFormat};
use crate::domain::{Classification, DocumentType};

use super::json_reply::strip_code_fence;
use super::{PromptCatalog, RetryPolicy};

/// Asks the language model for the document type of a routing sample.
pub struct DocumentClassifier {
    llm_client: Arc<dyn LlmClient>,
    prompts: Arc<PromptCatalog>,
    retry_policy: RetryPolicy,
}

impl DocumentClassifier {
    pub fn new(
        llm_client: Arc<dyn LlmClient>,
        prompts: Arc<PromptCatalog>,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            llm_client,
            prompts,
            retry_policy,
        }
    }

    /// Transport failures surface as errors once retries are spent; a reply
    /// that cannot be decoded yields an UNKNOWN classification instead.
    #[tracing::instrument(skip(self, sample_text), fields(sample_chars = sample_text.chars().count()))]
    pub async fn classify(&self, sample_text: &str) -> Result<Classification, ClassificationError> {
        let client = &self.llm_client;
        let system_prompt = self.prompts.classification();

        let raw = self
            .retry_policy
            .run("classify_document", move || {
                client.complete(system_prompt, sample_text, ResponseFormat::Json)
            })
            .await?;

        let classification = parse_classification(&raw);
        tracing::info!(
            document_type = %classification.document_type,
            confidence = classification.confidence,
            "Document classified"
        );

        Ok(classification)
    }
}

/// Decodes a model reply. Never fails: shape problems map to UNKNOWN with
/// zero confidence and the problem recorded as the reason.
pub fn parse_classification(raw: &str) -> Classification {
    let body = strip_code_fence(raw);

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Classification response is not valid JSON");
            return Classification::unknown(format!("invalid JSON in classification response: {e}"));
        }
    };

    let Some(fields) = value.as_object() else {
        return Classification::unknown("classification response is not a JSON object");
    };

    let Some(type_name) = fields.get("document_type").and_then(Value::as_str) else {
        tracing::warn!("Classification response has no document_type");
        return Classification::unknown("classification response is missing document_type");
    };

    let reason = fields
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match type_name.parse::<DocumentType>() {
        Ok(document_type) => {
            let confidence = fields.get("confidence").map(read_confidence).unwrap_or(0.0);
            Classification::new(document_type, confidence, reason)
        }
        Err(_) => {
            tracing::warn!(document_type = %type_name, "Unrecognized document type");
            Classification::unknown(format!("unrecognized document type '{type_name}': {reason}"))
        }
    }
}

fn read_confidence(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("classification request failed: {0}")]
    Transport(#[from] LlmClientError),
}
